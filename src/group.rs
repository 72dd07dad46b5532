use std::fmt::{self, Display};

use crate::{Body, Config};

/// Index of a group inside its [`Suite`](crate::Suite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) usize);

impl GroupId {
    /// The anonymous root group every suite starts with.
    pub const ROOT: GroupId = GroupId(0);
}

/// A named collection of specs, hooks and explicit config.
///
/// Groups only know their parent. Everything inherited (title path, hooks,
/// config) is computed by walking upwards, see [`GroupView`](crate::GroupView).
#[derive(Debug)]
#[non_exhaustive]
pub struct Group {
    pub title: String,
    pub parent: Option<GroupId>,
    pub specs: Vec<Spec>,
    pub hooks: Vec<Hook>,
    pub config: Config,
}

impl Group {
    pub(crate) fn new(title: impl Into<String>, parent: Option<GroupId>) -> Self {
        Self {
            title: title.into(),
            parent,
            specs: Vec::new(),
            hooks: Vec::new(),
            config: Config::default(),
        }
    }
}

/// A single test case.
#[derive(Debug, Clone)]
pub struct Spec {
    pub title: String,
    pub body: Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    BeforeEach,
    AfterEach,
    BeforeAll,
    AfterAll,
}

impl HookKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            HookKind::BeforeEach => "beforeEach",
            HookKind::AfterEach => "afterEach",
            HookKind::BeforeAll => "beforeAll",
            HookKind::AfterAll => "afterAll",
        }
    }
}

impl Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A setup or teardown body bound to a lifecycle point of its group.
#[derive(Debug, Clone)]
pub struct Hook {
    pub kind: HookKind,
    pub title: String,
    pub body: Body,
}
