use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::error::TypeError;
use crate::identity::{EntityId, EntityKey};
use crate::kind::EntityKind;
use crate::temporal;
use crate::value::AttrValue;

/// Discriminator field naming the concrete type in a persisted record.
pub const CLASS_FIELD: &str = "__class__";

/// Persisted form of an entity: a flat JSON object.
pub type Record = serde_json::Map<String, Value>;

/// Attribute names that cannot be assigned after construction.
const READ_ONLY: [&str; 4] = ["id", "created_at", "updated_at", CLASS_FIELD];

/// One managed record.
///
/// An entity has a fixed identity, two timestamps, the declared fields of
/// its kind (initialised to empty strings), and an overflow map for any
/// other attribute assigned by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    kind: EntityKind,
    id: EntityId,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    declared: BTreeMap<String, String>,
    extra: BTreeMap<String, String>,
}

impl Entity {
    /// Construct a fresh entity with a new identity. Both timestamps are
    /// set to the current time.
    pub fn new(kind: EntityKind) -> Self {
        let now = temporal::now();
        Self {
            kind,
            id: EntityId::generate(),
            created_at: now,
            updated_at: now,
            declared: kind
                .declared_fields()
                .iter()
                .map(|field| (field.to_string(), String::new()))
                .collect(),
            extra: BTreeMap::new(),
        }
    }

    /// Reconstruct an entity from its persisted record.
    ///
    /// Identity and timestamps are taken verbatim from the record; no new
    /// identity is generated.
    pub fn from_record(record: &Record) -> Result<Self, TypeError> {
        let kind: EntityKind = required_str(record, CLASS_FIELD)?.parse()?;
        let id = EntityId::from(required_str(record, "id")?);
        let created_at = temporal::parse("created_at", required_str(record, "created_at")?)?;
        let updated_at = temporal::parse("updated_at", required_str(record, "updated_at")?)?;

        let mut entity = Self {
            kind,
            id,
            created_at,
            updated_at,
            declared: BTreeMap::new(),
            extra: BTreeMap::new(),
        };
        for field in kind.declared_fields() {
            entity.declared.insert(field.to_string(), String::new());
        }
        for (name, value) in record {
            if READ_ONLY.contains(&name.as_str()) {
                continue;
            }
            entity.assign(name, AttrValue::from_json(value).render());
        }
        Ok(entity)
    }

    /// Persisted form, including the [`CLASS_FIELD`] discriminator.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        for (name, value) in self.attributes() {
            record.insert(name.to_string(), Value::String(value.render()));
        }
        record.insert(CLASS_FIELD.to_string(), Value::String(self.kind.name().to_string()));
        record
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> NaiveDateTime {
        self.updated_at
    }

    /// The store key for this entity.
    pub fn key(&self) -> EntityKey {
        EntityKey::new(self.kind, self.id.clone())
    }

    /// Whether `name` is reserved and cannot be assigned with [`set`](Self::set).
    pub fn is_read_only(name: &str) -> bool {
        READ_ONLY.contains(&name)
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<AttrValue> {
        match name {
            "id" => Some(AttrValue::Text(self.id.to_string())),
            "created_at" => Some(AttrValue::Timestamp(self.created_at)),
            "updated_at" => Some(AttrValue::Timestamp(self.updated_at)),
            _ => self
                .declared
                .get(name)
                .or_else(|| self.extra.get(name))
                .map(|value| AttrValue::Text(value.clone())),
        }
    }

    /// Assign an attribute by name. Undeclared names go to the overflow map.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Result<(), TypeError> {
        if Self::is_read_only(name) {
            return Err(TypeError::ReadOnlyAttribute(name.to_string()));
        }
        self.assign(name, value.into());
        Ok(())
    }

    /// Refresh `updated_at`.
    pub fn touch(&mut self) {
        self.updated_at = temporal::now();
    }

    /// All attributes in display order: identity and timestamps, declared
    /// fields in declaration order, then ad-hoc fields by name.
    pub fn attributes(&self) -> Vec<(&str, AttrValue)> {
        let mut attrs = vec![
            ("id", AttrValue::Text(self.id.to_string())),
            ("created_at", AttrValue::Timestamp(self.created_at)),
            ("updated_at", AttrValue::Timestamp(self.updated_at)),
        ];
        for field in self.kind.declared_fields() {
            if let Some(value) = self.declared.get(*field) {
                attrs.push((*field, AttrValue::Text(value.clone())));
            }
        }
        for (name, value) in &self.extra {
            attrs.push((name.as_str(), AttrValue::Text(value.clone())));
        }
        attrs
    }

    fn assign(&mut self, name: &str, value: String) {
        if self.kind.declares(name) {
            self.declared.insert(name.to_string(), value);
        } else {
            self.extra.insert(name.to_string(), value);
        }
    }
}

fn required_str<'a>(record: &'a Record, field: &'static str) -> Result<&'a str, TypeError> {
    record
        .get(field)
        .and_then(Value::as_str)
        .ok_or(TypeError::MissingField(field))
}

impl fmt::Display for Entity {
    /// `[Type] (id) {"attr": "value", ...}`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] ({}) {{", self.kind, self.id)?;
        for (i, (name, value)) in self.attributes().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", name, value.render())?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn new_entity_has_equal_timestamps_and_empty_declared_fields() {
        let city = Entity::new(EntityKind::City);
        assert_eq!(city.created_at(), city.updated_at());
        assert_eq!(city.get("name"), Some(AttrValue::from("")));
        assert_eq!(city.get("state_id"), Some(AttrValue::from("")));
        assert_eq!(city.get("nickname"), None);
    }

    #[test]
    fn key_matches_kind_and_id() {
        let user = Entity::new(EntityKind::User);
        assert_eq!(user.key().to_string(), format!("User.{}", user.id()));
    }

    #[test]
    fn set_declared_and_adhoc_attributes() {
        let mut state = Entity::new(EntityKind::State);
        state.set("name", "California").unwrap();
        state.set("motto", "Eureka").unwrap();
        assert_eq!(state.get("name"), Some(AttrValue::from("California")));
        assert_eq!(state.get("motto"), Some(AttrValue::from("Eureka")));
    }

    #[test]
    fn set_rejects_read_only_attributes() {
        let mut model = Entity::new(EntityKind::BaseModel);
        for name in ["id", "created_at", "updated_at", CLASS_FIELD] {
            assert_eq!(
                model.set(name, "x").unwrap_err(),
                TypeError::ReadOnlyAttribute(name.to_string())
            );
        }
    }

    #[test]
    fn touch_advances_updated_at() {
        let mut model = Entity::new(EntityKind::BaseModel);
        let before = model.updated_at();
        std::thread::sleep(std::time::Duration::from_millis(2));
        model.touch();
        assert!(model.updated_at() > before);
        assert_eq!(model.created_at(), before);
    }

    #[test]
    fn to_record_contains_discriminator_and_iso_timestamps() {
        let mut amenity = Entity::new(EntityKind::Amenity);
        amenity.set("name", "Wifi").unwrap();
        let rec = amenity.to_record();
        assert_eq!(rec[CLASS_FIELD], json!("Amenity"));
        assert_eq!(rec["id"], json!(amenity.id().as_str()));
        assert_eq!(rec["name"], json!("Wifi"));
        assert_eq!(
            rec["created_at"],
            json!(temporal::format(&amenity.created_at()))
        );
    }

    #[test]
    fn from_record_takes_identity_verbatim() {
        let rec = record(json!({
            "id": "fixed-id",
            "created_at": "2026-10-17T09:00:00.000001",
            "updated_at": "2026-10-17T10:00:00",
            "name": "Lagos",
            "population": 15000000,
            "__class__": "City"
        }));
        let city = Entity::from_record(&rec).unwrap();
        assert_eq!(city.kind(), EntityKind::City);
        assert_eq!(city.id().as_str(), "fixed-id");
        assert_eq!(city.get("name"), Some(AttrValue::from("Lagos")));
        assert_eq!(city.get("population"), Some(AttrValue::from("15000000")));
        assert_eq!(city.get("state_id"), Some(AttrValue::from("")));
        assert_eq!(
            temporal::format(&city.updated_at()),
            "2026-10-17T10:00:00.000000"
        );
    }

    #[test]
    fn from_record_unknown_class() {
        let rec = record(json!({
            "id": "1",
            "created_at": "2026-10-17T09:00:00",
            "updated_at": "2026-10-17T09:00:00",
            "__class__": "Spaceship"
        }));
        assert_eq!(
            Entity::from_record(&rec).unwrap_err(),
            TypeError::UnknownKind("Spaceship".into())
        );
    }

    #[test]
    fn from_record_missing_fields() {
        let rec = record(json!({ "id": "1", "__class__": "User" }));
        assert_eq!(
            Entity::from_record(&rec).unwrap_err(),
            TypeError::MissingField("created_at")
        );
        let rec = record(json!({ "__class__": "User" }));
        assert_eq!(
            Entity::from_record(&rec).unwrap_err(),
            TypeError::MissingField("id")
        );
        let rec = record(json!({ "id": "1" }));
        assert_eq!(
            Entity::from_record(&rec).unwrap_err(),
            TypeError::MissingField(CLASS_FIELD)
        );
    }

    #[test]
    fn display_format() {
        let mut state = Entity::new(EntityKind::State);
        state.set("name", "example_state").unwrap();
        let shown = state.to_string();
        assert!(shown.starts_with(&format!("[State] ({}) {{\"id\": ", state.id())));
        assert!(shown.contains("\"name\": \"example_state\""));
        assert!(shown.ends_with('}'));
    }

    #[test]
    fn display_is_stable() {
        let review = Entity::new(EntityKind::Review);
        assert_eq!(review.to_string(), review.to_string());
    }

    #[test]
    fn attributes_order() {
        let mut user = Entity::new(EntityKind::User);
        user.set("zodiac", "leo").unwrap();
        user.set("alias", "bb").unwrap();
        let names: Vec<&str> = user.attributes().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            [
                "id",
                "created_at",
                "updated_at",
                "email",
                "password",
                "first_name",
                "last_name",
                "alias",
                "zodiac"
            ]
        );
    }

    proptest! {
        #[test]
        fn record_roundtrip_preserves_attributes(
            kind_idx in 0usize..EntityKind::ALL.len(),
            attrs in proptest::collection::btree_map("[a-z][a-z_]{0,11}", ".{0,24}", 0..8),
        ) {
            let mut entity = Entity::new(EntityKind::ALL[kind_idx]);
            for (name, value) in &attrs {
                if !Entity::is_read_only(name) {
                    entity.set(name, value.clone()).unwrap();
                }
            }
            let restored = Entity::from_record(&entity.to_record()).unwrap();
            prop_assert_eq!(restored, entity);
        }
    }
}
