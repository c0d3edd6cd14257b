use std::fmt;

/// A store operation requested by a console line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    Show,
    Destroy,
    All,
    Update,
    Count,
}

impl Verb {
    /// Verbs accepted in verb form.
    pub const ALL: [Verb; 6] = [
        Self::Create,
        Self::Show,
        Self::Destroy,
        Self::All,
        Self::Update,
        Self::Count,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Show => "show",
            Self::Destroy => "destroy",
            Self::All => "all",
            Self::Update => "update",
            Self::Count => "count",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|verb| verb.name() == name)
    }

    /// Whether the verb may be used in dotted form. `create` may not.
    pub fn is_dotted(self) -> bool {
        !matches!(self, Self::Create)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute assignments carried by an `update`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Updates {
    /// No attribute name was given.
    #[default]
    Missing,
    /// A name without a value.
    NameOnly(String),
    /// One or more complete assignments, applied together.
    Pairs(Vec<(String, String)>),
}

impl Updates {
    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Pairs(vec![(name.into(), value.into())])
    }
}

/// Normalized command, independent of the grammar it was written in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub verb: Verb,
    pub type_name: Option<String>,
    pub id: Option<String>,
    pub updates: Updates,
}

impl Request {
    pub fn new(verb: Verb) -> Self {
        Self {
            verb,
            type_name: None,
            id: None,
            updates: Updates::Missing,
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_updates(mut self, updates: Updates) -> Self {
        self.updates = updates;
        self
    }
}

/// A classified console line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Line {
    /// Blank input; does nothing.
    Empty,
    Quit,
    /// End of input (Ctrl-D or the literal `EOF` command).
    Eof,
    Help(Option<String>),
    Request(Request),
    /// Dotted form naming a function that does not exist.
    BadFunction,
    /// Anything else, echoed back in the diagnostic.
    Unknown(String),
}
