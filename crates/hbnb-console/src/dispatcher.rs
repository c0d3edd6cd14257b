use std::io::{self, Write};

use hbnb_store::Storage;
use hbnb_types::{Entity, EntityKey, EntityKind};
use tracing::debug;

use crate::error::ShellError;
use crate::help;
use crate::parser::parse_line;
use crate::request::{Line, Request, Updates, Verb};

/// What the console loop should do after a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Executes console lines against a store.
///
/// The store and the output stream are injected, so a dispatcher can run
/// against a temp-file store and a byte buffer in tests.
pub struct Dispatcher<S, W> {
    store: S,
    out: W,
}

impl<S: Storage, W: Write> Dispatcher<S, W> {
    pub fn new(store: S, out: W) -> Self {
        Self { store, out }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_parts(self) -> (S, W) {
        (self.store, self.out)
    }

    /// Run one console line, printing its result or diagnostic.
    ///
    /// Only a failure to write output is returned as an error.
    pub fn run_line(&mut self, line: &str) -> io::Result<Flow> {
        let result = match parse_line(line) {
            Line::Empty => Ok(()),
            Line::Quit => return Ok(Flow::Exit),
            Line::Eof => {
                writeln!(self.out)?;
                return Ok(Flow::Exit);
            }
            Line::Help(topic) => {
                help::write_help(&mut self.out, topic.as_deref()).map_err(ShellError::from)
            }
            Line::Request(request) => self.execute(&request),
            Line::BadFunction => Err(ShellError::IncorrectFunction),
            Line::Unknown(text) => Err(ShellError::UnknownSyntax(text)),
        };
        match result {
            Ok(()) => {}
            Err(ShellError::Output(e)) => return Err(e),
            Err(e) => writeln!(self.out, "{e}")?,
        }
        self.out.flush()?;
        Ok(Flow::Continue)
    }

    /// Execute a normalized request.
    ///
    /// Checks run in a fixed order and stop at the first failure; nothing is
    /// modified before every check has passed.
    pub fn execute(&mut self, request: &Request) -> Result<(), ShellError> {
        debug!(verb = %request.verb, type_name = ?request.type_name, id = ?request.id, "executing");
        match request.verb {
            Verb::Create => self.create(request),
            Verb::Show => self.show(request),
            Verb::Destroy => self.destroy(request),
            Verb::All => self.all(request),
            Verb::Update => self.update(request),
            Verb::Count => self.count(request),
        }
    }

    fn create(&mut self, request: &Request) -> Result<(), ShellError> {
        let kind = resolve_kind(request)?;
        let mut entity = kind.instantiate();
        entity.touch();
        let id = entity.id().clone();
        self.store.register(entity);
        self.store.save()?;
        debug!(%kind, %id, "created");
        writeln!(self.out, "{id}")?;
        Ok(())
    }

    fn show(&mut self, request: &Request) -> Result<(), ShellError> {
        let key = resolve_key(request)?;
        let entity = self.store.get(&key).ok_or(ShellError::InstanceNotFound)?;
        writeln!(self.out, "{entity}")?;
        Ok(())
    }

    fn destroy(&mut self, request: &Request) -> Result<(), ShellError> {
        let key = resolve_key(request)?;
        self.store.remove(&key).ok_or(ShellError::InstanceNotFound)?;
        self.store.save()?;
        debug!(%key, "destroyed");
        Ok(())
    }

    fn all(&mut self, request: &Request) -> Result<(), ShellError> {
        let entities: Vec<&Entity> = match request.type_name {
            None => self.store.all().values().collect(),
            Some(_) => self.store.of_kind(resolve_kind(request)?),
        };
        for entity in entities {
            writeln!(self.out, "{entity}")?;
        }
        Ok(())
    }

    /// Apply every assignment or none of them, then persist once.
    fn update(&mut self, request: &Request) -> Result<(), ShellError> {
        let key = resolve_key(request)?;
        if self.store.get(&key).is_none() {
            return Err(ShellError::InstanceNotFound);
        }
        let pairs = match &request.updates {
            Updates::Missing => return Err(ShellError::AttributeNameMissing),
            Updates::NameOnly(_) => return Err(ShellError::ValueMissing),
            Updates::Pairs(pairs) if pairs.is_empty() => {
                return Err(ShellError::AttributeNameMissing)
            }
            Updates::Pairs(pairs) => pairs,
        };
        if pairs.iter().any(|(name, _)| name.is_empty()) {
            return Err(ShellError::AttributeNameMissing);
        }
        if pairs.iter().any(|(name, _)| Entity::is_read_only(name)) {
            return Err(ShellError::ReadOnlyAttribute);
        }

        let entity = self
            .store
            .get_mut(&key)
            .ok_or(ShellError::InstanceNotFound)?;
        for (name, value) in pairs {
            entity
                .set(name, value.as_str())
                .map_err(|_| ShellError::ReadOnlyAttribute)?;
        }
        entity.touch();
        self.store.save()?;
        debug!(%key, attributes = pairs.len(), "updated");
        Ok(())
    }

    fn count(&mut self, request: &Request) -> Result<(), ShellError> {
        let kind = resolve_kind(request)?;
        writeln!(self.out, "{}", self.store.count(kind))?;
        Ok(())
    }
}

fn resolve_kind(request: &Request) -> Result<EntityKind, ShellError> {
    let name = request
        .type_name
        .as_deref()
        .ok_or(ShellError::ClassNameMissing)?;
    EntityKind::resolve(name).ok_or(ShellError::ClassDoesNotExist)
}

fn resolve_key(request: &Request) -> Result<EntityKey, ShellError> {
    let kind = resolve_kind(request)?;
    let id = request.id.as_deref().ok_or(ShellError::InstanceIdMissing)?;
    Ok(EntityKey::new(kind, id))
}
