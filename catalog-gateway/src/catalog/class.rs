use std::sync::Arc;

use catalog_gateway_crds::v1beta1::ServiceClass;
use catalog_gateway_k8s_utils::ResourceCache;

use super::pagination::paginate;
use super::sorted;
use crate::kubernetes::INDEX_EXTERNAL_NAME;
use crate::Result;

pub struct ClassService {
    cache: ResourceCache<ServiceClass>,
}

impl ClassService {
    pub fn new(cache: ResourceCache<ServiceClass>) -> Self {
        Self { cache }
    }

    pub fn find(&self, name: &str) -> Option<Arc<ServiceClass>> {
        self.cache.get(name, None)
    }

    /// Classes are addressed by external name in instance specs.
    pub fn find_by_external_name(&self, external_name: &str) -> Result<Option<Arc<ServiceClass>>> {
        let matches = self.cache.by_index(INDEX_EXTERNAL_NAME, external_name)?;
        Ok(sorted(matches).into_iter().next())
    }

    pub fn list(&self, first: Option<usize>, offset: Option<usize>) -> Vec<Arc<ServiceClass>> {
        paginate(sorted(self.cache.state()), first, offset)
    }
}

#[cfg(test)]
mod tests {
    use catalog_gateway_crds::v1beta1::ServiceClassSpec;
    use catalog_gateway_k8s_utils::cache;
    use kube::runtime::watcher;
    use kube::ResourceExt;

    use super::*;
    use crate::kubernetes::class_indexes;

    fn make_class(name: &str, external_name: &str) -> ServiceClass {
        ServiceClass::new(
            name,
            ServiceClassSpec {
                external_name: external_name.into(),
                service_broker_name: "broker-a".into(),
                ..Default::default()
            },
        )
    }

    async fn seeded_service(classes: Vec<ServiceClass>) -> ClassService {
        let (cache, mut writer) = cache(class_indexes());
        for class in classes {
            writer.apply(watcher::Event::Apply(class)).await;
        }
        ClassService::new(cache)
    }

    #[tokio::test]
    async fn test_find_by_external_name() {
        let service = seeded_service(vec![
            make_class("class-a", "redis"),
            make_class("class-b", "postgres"),
        ])
        .await;

        let class = service.find_by_external_name("redis").unwrap().unwrap();
        assert_eq!(class.name_any(), "class-a");
        assert!(service.find_by_external_name("mysql").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_sorted_and_windowed() {
        let service = seeded_service(vec![
            make_class("class-c", "c"),
            make_class("class-a", "a"),
            make_class("class-b", "b"),
        ])
        .await;

        let names: Vec<String> = service
            .list(Some(2), None)
            .iter()
            .map(|class| class.name_any())
            .collect();
        assert_eq!(names, vec!["class-a", "class-b"]);
    }
}
