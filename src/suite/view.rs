use std::iter;

use crate::{Config, Group, GroupId, Hook, Spec, Suite};

/// Read access to a group together with everything it inherits.
///
/// Inherited values are computed on every call by walking the parent chain,
/// nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct GroupView<'s> {
    suite: &'s Suite,
    id: GroupId,
}

impl<'s> GroupView<'s> {
    pub(crate) fn new(suite: &'s Suite, id: GroupId) -> Self {
        Self { suite, id }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn group(&self) -> &'s Group {
        self.suite.group_at(self.id)
    }

    pub fn title(&self) -> &'s str {
        &self.group().title
    }

    pub fn specs(&self) -> &'s [Spec] {
        &self.group().specs
    }

    pub fn parent(&self) -> Option<GroupView<'s>> {
        self.group()
            .parent
            .map(|parent| GroupView::new(self.suite, parent))
    }

    /// This group followed by its ancestors, up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = GroupView<'s>> + use<'s> {
        iter::successors(Some(*self), GroupView::parent)
    }

    fn lineage(&self) -> Vec<GroupView<'s>> {
        let mut lineage: Vec<_> = self.ancestors().collect();
        lineage.reverse();
        lineage
    }

    /// Non-empty titles from the root down to this group.
    pub fn title_path(&self) -> Vec<&'s str> {
        self.lineage()
            .into_iter()
            .map(|view| view.title())
            .filter(|title| !title.is_empty())
            .collect()
    }

    /// The key this group is registered under: its title path without delimiters.
    ///
    /// Different title paths may produce the same identifier (`"a" + "bc"` and `"ab" + "c"`).
    pub fn identifier(&self) -> String {
        self.title_path().concat()
    }

    /// All hooks that apply to this group, of every kind.
    ///
    /// Ordered from the root down to this group, each group's hooks in
    /// declaration order. Teardown hooks use the same order, an ancestor's
    /// `afterAll` runs before the one of a descendant.
    pub fn hooks(&self) -> Vec<&'s Hook> {
        self.lineage()
            .into_iter()
            .flat_map(|view| view.group().hooks.iter())
            .collect()
    }

    /// The effective config of this group.
    ///
    /// Each field resolves to the nearest non-zero explicit value on this
    /// group or its ancestors.
    pub fn config(&self) -> Config {
        self.lineage()
            .into_iter()
            .fold(Config::new(), |inherited, view| {
                view.group().config.inherit(inherited)
            })
    }
}
