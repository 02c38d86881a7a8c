use std::collections::BTreeMap;

pub const DEPENDENT_POD_LABEL: &str = "homework.interview.me/pod";

pub fn get_dependent_pod_labels(owner_name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([
        (DEPENDENT_POD_LABEL.to_owned(), owner_name.to_owned()),
        ("app.kubernetes.io/managed-by".to_owned(), "dummy-controller".to_owned()),
    ])
}
