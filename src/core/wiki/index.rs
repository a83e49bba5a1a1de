use std::collections::BTreeMap;

use super::discover::{DocModule, README};

/// `"<module>/<source path>"` to page name, across every discovered module.
///
/// Built once after discovery; the rewrite pass only reads it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalLinkIndex {
    pages: BTreeMap<String, String>,
}

impl GlobalLinkIndex {
    /// Later modules overwrite earlier ones on key collisions.
    pub fn build(modules: &[DocModule]) -> Self {
        let pages = modules
            .iter()
            .flat_map(|module| {
                module
                    .links
                    .iter()
                    .map(move |(source, page)| (format!("{}/{}", module.id, source), page.clone()))
            })
            .collect();
        Self { pages }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pages.get(key).map(String::as_str)
    }

    /// README page of a module, if it has one.
    pub fn module_home(&self, module_id: &str) -> Option<&str> {
        self.get(&format!("{}/{}", module_id, README))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
