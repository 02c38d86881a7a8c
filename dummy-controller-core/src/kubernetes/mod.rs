use k8s_openapi::NamespaceResourceScope;
use kube::{Api, Client, Resource};

pub mod operations;
pub mod store;

pub trait GetApi {
    fn global_api<T>(&self) -> Api<T>
    where
        T: Resource,
        T::DynamicType: Default;

    fn namespaced_api<T>(&self, namespace: &str) -> Api<T>
    where
        T: Resource<Scope = NamespaceResourceScope>,
        T::DynamicType: Default;

    /// Namespaced api if a namespace is given, cluster-wide otherwise
    fn scoped_api<T>(&self, namespace: Option<&str>) -> Api<T>
    where
        T: Resource<Scope = NamespaceResourceScope>,
        T::DynamicType: Default;
}

impl GetApi for Client {
    fn global_api<T>(&self) -> Api<T>
    where
        T: Resource,
        T::DynamicType: Default,
    {
        Api::all(self.clone())
    }

    fn namespaced_api<T>(&self, namespace: &str) -> Api<T>
    where
        T: Resource<Scope = NamespaceResourceScope>,
        T::DynamicType: Default,
    {
        Api::namespaced(self.clone(), namespace)
    }

    fn scoped_api<T>(&self, namespace: Option<&str>) -> Api<T>
    where
        T: Resource<Scope = NamespaceResourceScope>,
        T::DynamicType: Default,
    {
        match namespace {
            Some(namespace) => self.namespaced_api(namespace),
            None => self.global_api(),
        }
    }
}
