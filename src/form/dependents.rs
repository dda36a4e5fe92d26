//! Dependent list operations: add, update in place, remove by id.

use tracing::debug;

use super::model::{Dependent, DependentField, DependentId, DependentList, Relationship};

impl DependentList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty dependent and return its freshly allocated id.
    pub fn add(&mut self) -> DependentId {
        let id = DependentId(self.next_id);
        self.next_id += 1;
        self.entries.push(Dependent::new(id));
        debug!(id = %id, count = self.entries.len(), "Dependent added");
        id
    }

    /// Replace one field of the dependent with `id`. Unknown ids are ignored.
    ///
    /// A relationship value that is not Spouse/Child/Other clears the field.
    pub fn update(&mut self, id: DependentId, field: DependentField, value: &str) {
        let Some(dep) = self.entries.iter_mut().find(|d| d.id == id) else {
            debug!(id = %id, "Update ignored: no such dependent");
            return;
        };
        match field {
            DependentField::Name => dep.name = value.to_string(),
            DependentField::DateOfBirth => dep.date_of_birth = value.to_string(),
            DependentField::Relationship => dep.relationship = value.parse::<Relationship>().ok(),
        }
    }

    /// Drop the dependent with `id`. Unknown ids are ignored.
    pub fn remove(&mut self, id: DependentId) {
        let before = self.entries.len();
        self.entries.retain(|d| d.id != id);
        if self.entries.len() == before {
            debug!(id = %id, "Remove ignored: no such dependent");
        }
    }

    pub fn get(&self, id: DependentId) -> Option<&Dependent> {
        self.entries.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Dependent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DependentList {
    type Item = &'a Dependent;
    type IntoIter = std::slice::Iter<'a, Dependent>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_with(names: &[&str]) -> DependentList {
        let mut list = DependentList::new();
        for name in names {
            let id = list.add();
            list.update(id, DependentField::Name, name);
        }
        list
    }

    #[test]
    fn add_appends_empty_dependent() {
        let mut list = DependentList::new();
        let id = list.add();

        assert_eq!(list.len(), 1);
        let dep = list.get(id).unwrap();
        assert!(dep.name.is_empty());
        assert!(dep.relationship.is_none());
        assert!(dep.date_of_birth.is_empty());
    }

    #[test]
    fn ids_are_never_reused() {
        let mut list = DependentList::new();
        let a = list.add();
        list.remove(a);
        let b = list.add();
        let c = list.add();

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn add_then_remove_restores_prior_state() {
        let mut list = list_with(&["Ann", "Ben"]);
        let before = list.clone();

        let id = list.add();
        list.update(id, DependentField::Name, "Cal");
        list.remove(id);

        assert_eq!(list, before);
    }

    #[test]
    fn update_changes_only_target() {
        let mut list = DependentList::new();
        let a = list.add();
        let b = list.add();

        list.update(b, DependentField::Relationship, "Child");
        list.update(b, DependentField::DateOfBirth, "2015-06-01");

        assert_eq!(list.get(b).unwrap().relationship, Some(Relationship::Child));
        assert_eq!(list.get(b).unwrap().date_of_birth, "2015-06-01");
        assert!(list.get(a).unwrap().relationship.is_none());
    }

    #[test]
    fn update_unknown_id_is_noop() {
        let mut list = list_with(&["Ann"]);
        let before = list.clone();

        list.update(DependentId(999), DependentField::Name, "Ghost");

        assert_eq!(list, before);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let mut list = list_with(&["Ann", "Ben"]);
        let before = list.clone();

        list.remove(DependentId(42));

        assert_eq!(list, before);
    }

    #[test]
    fn unknown_relationship_clears_field() {
        let mut list = DependentList::new();
        let id = list.add();
        list.update(id, DependentField::Relationship, "Spouse");
        list.update(id, DependentField::Relationship, "Cousin");

        assert!(list.get(id).unwrap().relationship.is_none());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let list = list_with(&["Ann", "Ben", "Cal"]);
        let names: Vec<_> = list.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Ben", "Cal"]);
    }
}
