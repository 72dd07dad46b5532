//! Declaration of nested test groups.
//!
//! A [`Suite`] is one registration session. It owns every group declared
//! through it (an arena indexed by [`GroupId`]), the registry of groups that
//! will run, and the slot pointing at the group currently being declared.
//!
//! Declarations are made in a single synchronous pass:
//!
//! ```
//! use std::time::Duration;
//! use kisuite::{Config, Suite};
//!
//! let mut suite = Suite::new();
//! suite.group("math", |t| {
//!     t.configure(Config::new().with_timeout(Duration::from_secs(1)))?;
//!     t.before_each(|| async {})?;
//!     t.test("adds", || async { assert_eq!(1 + 1, 2) })?;
//!     Ok(())
//! })?;
//! assert_eq!(suite.identifiers().collect::<Vec<_>>(), ["math"]);
//! # Ok::<(), kisuite::DeclareError>(())
//! ```
//!
//! Once the suite starts running, declarations are closed and every
//! declaration function fails with [`DeclareError::OutOfContext`].

use indexmap::{IndexMap, map::Entry};
use tracing::{trace, warn};

use crate::{
    Body, BodyResult, Config, DeclareError, Group, GroupId, Hook, HookKind, Runner, Spec,
    StageError, runner,
};

mod view;
pub use view::*;

#[derive(Debug)]
pub struct Suite {
    groups: Vec<Group>,
    registry: IndexMap<String, GroupId>,
    loading: Option<GroupId>,
}

impl Default for Suite {
    fn default() -> Self {
        Self {
            groups: vec![Group::new("", None)],
            registry: IndexMap::new(),
            loading: Some(GroupId::ROOT),
        }
    }
}

impl Suite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a spec in the group currently being declared.
    ///
    /// The first spec of a group registers the group under its identifier.
    pub fn test<F, Fut, T>(&mut self, title: impl Into<String>, body: F) -> Result<(), DeclareError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<BodyResult> + 'static,
    {
        let id = self.loading("test()")?;
        let title = title.into();
        trace!(group = id.0, spec = %title, "declare spec");
        self.groups[id.0].specs.push(Spec {
            title,
            body: Body::new(body),
        });

        let identifier = self.node(id).identifier();
        match self.registry.entry(identifier) {
            Entry::Vacant(entry) => {
                entry.insert(id);
            }
            Entry::Occupied(entry) if *entry.get() != id => {
                warn!(
                    identifier = %entry.key(),
                    "identifier already taken by another group, specs of this group will not run"
                );
            }
            Entry::Occupied(_) => {}
        }
        Ok(())
    }

    /// Declare a nested group.
    ///
    /// `declare` runs right away, everything it declares lands in the new group.
    pub fn group<F>(&mut self, title: impl Into<String>, declare: F) -> Result<GroupId, DeclareError>
    where
        F: FnOnce(&mut Suite) -> Result<(), DeclareError>,
    {
        self.declare_group(title.into(), declare)
    }

    /// Declare a nested group without a title.
    ///
    /// Untitled groups do not show up in title paths or identifiers.
    pub fn group_untitled<F>(&mut self, declare: F) -> Result<GroupId, DeclareError>
    where
        F: FnOnce(&mut Suite) -> Result<(), DeclareError>,
    {
        self.declare_group(String::new(), declare)
    }

    fn declare_group<F>(&mut self, title: String, declare: F) -> Result<GroupId, DeclareError>
    where
        F: FnOnce(&mut Suite) -> Result<(), DeclareError>,
    {
        let parent = self.loading("group()")?;
        let id = GroupId(self.groups.len());
        trace!(group = id.0, parent = parent.0, title = %title, "declare group");
        self.groups.push(Group::new(title, Some(parent)));

        let previous = self.loading.replace(id);
        let declared = declare(self);
        self.loading = previous;
        declared.map(|_| id)
    }

    /// Declare a hook with an explicit title.
    pub fn hook<F, Fut, T>(
        &mut self,
        kind: HookKind,
        title: impl Into<String>,
        body: F,
    ) -> Result<(), DeclareError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<BodyResult> + 'static,
    {
        let operation = match kind {
            HookKind::BeforeEach => "before_each()",
            HookKind::AfterEach => "after_each()",
            HookKind::BeforeAll => "before_all()",
            HookKind::AfterAll => "after_all()",
        };
        let id = self.loading(operation)?;
        self.groups[id.0].hooks.push(Hook {
            kind,
            title: title.into(),
            body: Body::new(body),
        });
        Ok(())
    }

    pub fn before_each<F, Fut, T>(&mut self, body: F) -> Result<(), DeclareError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<BodyResult> + 'static,
    {
        self.hook(HookKind::BeforeEach, default_hook_title(HookKind::BeforeEach), body)
    }

    pub fn after_each<F, Fut, T>(&mut self, body: F) -> Result<(), DeclareError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<BodyResult> + 'static,
    {
        self.hook(HookKind::AfterEach, default_hook_title(HookKind::AfterEach), body)
    }

    pub fn before_all<F, Fut, T>(&mut self, body: F) -> Result<(), DeclareError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<BodyResult> + 'static,
    {
        self.hook(HookKind::BeforeAll, default_hook_title(HookKind::BeforeAll), body)
    }

    pub fn after_all<F, Fut, T>(&mut self, body: F) -> Result<(), DeclareError>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = T> + Send + 'static,
        T: Into<BodyResult> + 'static,
    {
        self.hook(HookKind::AfterAll, default_hook_title(HookKind::AfterAll), body)
    }

    /// Set explicit config values on the group currently being declared.
    ///
    /// Only fields present in `config` are written, they overwrite earlier values.
    /// The config applies to the whole group regardless of where in the group it is declared.
    pub fn configure(&mut self, config: Config) -> Result<(), DeclareError> {
        let id = self.loading("configure()")?;
        self.groups[id.0].config.apply(config);
        Ok(())
    }

    /// Run every registered group with the [`Runner::default`] settings.
    ///
    /// Fails with the error of the first failing group in registration order.
    /// Must be awaited inside a Tokio runtime, see [`Runner::run`].
    pub async fn run(&mut self) -> Result<(), StageError> {
        Runner::default().run(self).await.into_result()
    }

    /// Run the lifecycle of a single registered group.
    ///
    /// Unknown identifiers are ignored. Must be awaited inside a Tokio
    /// runtime, bodies are spawned as tokio tasks.
    pub async fn run_group(&self, identifier: &str) -> Result<(), StageError> {
        match runner::run_group(self, identifier, &runner::EventSink::default()).await {
            Some(outcome) => outcome.result,
            None => Ok(()),
        }
    }

    pub fn root(&self) -> GroupView<'_> {
        self.node(GroupId::ROOT)
    }

    pub fn view(&self, id: GroupId) -> Option<GroupView<'_>> {
        (id.0 < self.groups.len()).then(|| self.node(id))
    }

    /// Look up a registered group by its identifier.
    pub fn lookup(&self, identifier: &str) -> Option<GroupView<'_>> {
        self.registry.get(identifier).map(|id| self.node(*id))
    }

    /// Identifiers of all registered groups, in registration order.
    pub fn identifiers(&self) -> impl ExactSizeIterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    pub fn is_declaring(&self) -> bool {
        self.loading.is_some()
    }

    pub(crate) fn close_declarations(&mut self) {
        self.loading = None;
    }

    fn loading(&self, operation: &'static str) -> Result<GroupId, DeclareError> {
        self.loading.ok_or(DeclareError::OutOfContext { operation })
    }

    fn node(&self, id: GroupId) -> GroupView<'_> {
        GroupView::new(self, id)
    }

    pub(crate) fn group_at(&self, id: GroupId) -> &Group {
        &self.groups[id.0]
    }
}

fn default_hook_title(kind: HookKind) -> String {
    format!("{kind} hook")
}
