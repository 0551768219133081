//! Health Profile Personalization
//!
//! A user's age and declared respiratory conditions raise the minimum
//! effective oxygen level they should stay above. That floor feeds the
//! safe-ascent search in [`altitude`](crate::altitude).
//!
//! ```text
//! Profile                       Floor
//! ------------------------------------
//! (none)                        16.0%
//! asthma                        17.5%
//! bronchitis                    18.0%
//! copd                          19.0%
//! age >= 60                     +0.5 on top
//! ```
//!
//! Conditions are not additive: only the highest matching floor applies.
//! Tags with no entry in the table are kept on the profile but do not change
//! the floor.
//!
//! ## Storage
//!
//! Conditions from the table are kept as flags, so they are always recorded
//! no matter how many other tags a profile carries. Other tags live in
//! fixed-capacity storage (16 tags of up to 32 bytes) so profiles can be
//! built without a heap; tags that do not fit are skipped with a warning by
//! the lenient constructors and reported by [`HealthProfile::add_condition`].

use crate::{
    constants::thresholds::{
        BASE_MIN_SAFE_OXYGEN_PCT, CONDITION_OXYGEN_FLOORS, SENIOR_AGE_YEARS, SENIOR_OXYGEN_BUMP_PCT,
    },
    errors::{ProfileError, ProfileResult},
    utils,
};

/// Maximum length of one unmapped condition tag in bytes
pub const MAX_CONDITION_TAG_LEN: usize = 32;

/// Maximum number of distinct unmapped conditions per profile (power of two)
pub const MAX_PROFILE_CONDITIONS: usize = 16;

/// A normalised (trimmed, lowercase) condition tag
pub type ConditionTag = heapless::String<MAX_CONDITION_TAG_LEN>;

type ConditionSet = heapless::FnvIndexSet<ConditionTag, MAX_PROFILE_CONDITIONS>;

const MAPPED_CONDITIONS: usize = CONDITION_OXYGEN_FLOORS.len();

/// Minimum safe oxygen availability (%) for an age and set of conditions
///
/// Starts from the 16.0% base floor, raises it to the highest floor of any
/// listed condition, then adds 0.5 for ages 60 and up. Never fails.
pub fn min_safe_oxygen<I>(age: Option<u32>, conditions: I) -> f64
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut floor = BASE_MIN_SAFE_OXYGEN_PCT;

    for condition in conditions {
        if let Some(index) = mapped_index(condition.as_ref()) {
            floor = floor.max(CONDITION_OXYGEN_FLOORS[index].1);
        }
    }

    if matches!(age, Some(age) if age >= SENIOR_AGE_YEARS) {
        floor += SENIOR_OXYGEN_BUMP_PCT;
    }

    utils::round2(floor)
}

/// Position of a tag in the condition-floor table, if it has one
fn mapped_index(tag: &str) -> Option<usize> {
    let tag = tag.trim();
    CONDITION_OXYGEN_FLOORS
        .iter()
        .position(|(name, _)| name.eq_ignore_ascii_case(tag))
}

/// User health profile used for personalization
#[derive(Debug, Clone, Default)]
pub struct HealthProfile {
    /// Age in years, if known
    age: Option<u32>,

    /// Conditions from the floor table, by table position
    mapped: [bool; MAPPED_CONDITIONS],

    /// Any other declared conditions as lowercase tags
    other: ConditionSet,
}

impl HealthProfile {
    /// Profile with an age and no conditions
    pub fn new(age: Option<u32>) -> Self {
        Self {
            age,
            ..Self::default()
        }
    }

    /// Build a profile from the comma-separated form used by user records,
    /// e.g. `"asthma,copd"`
    ///
    /// Tags that do not fit are skipped with a warning.
    pub fn from_csv(age: Option<u32>, conditions: &str) -> Self {
        let mut profile = Self::new(age);
        profile.extend_csv(conditions);
        profile
    }

    /// Builder form of [`add_condition`](Self::add_condition)
    ///
    /// Tags that do not fit are skipped with a warning.
    pub fn with_condition(mut self, tag: &str) -> Self {
        self.add_or_skip(tag);
        self
    }

    /// Add a condition tag; returns whether it was new
    ///
    /// Tags are trimmed and lowercased. Blank tags are ignored. Conditions
    /// from the floor table never fail.
    pub fn add_condition(&mut self, tag: &str) -> ProfileResult<bool> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(false);
        }

        if let Some(index) = mapped_index(tag) {
            let added = !self.mapped[index];
            self.mapped[index] = true;
            return Ok(added);
        }

        let tag = normalize_tag(tag)?;
        if self.other.contains(&tag) {
            return Ok(false);
        }
        self.other
            .insert(tag)
            .map_err(|_| ProfileError::TooManyConditions { capacity: MAX_PROFILE_CONDITIONS })
    }

    /// Age in years, if known
    pub fn age(&self) -> Option<u32> {
        self.age
    }

    /// Declared condition tags, mapped conditions first
    pub fn conditions(&self) -> impl Iterator<Item = &str> {
        CONDITION_OXYGEN_FLOORS
            .iter()
            .zip(self.mapped.iter())
            .filter(|(_, present)| **present)
            .map(|((name, _), _)| *name)
            .chain(self.other.iter().map(|tag| tag.as_str()))
    }

    /// Whether the profile lists a condition (case-insensitive)
    pub fn has_condition(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.conditions().any(|c| c.eq_ignore_ascii_case(tag))
    }

    /// Personal minimum safe oxygen availability (%)
    pub fn min_safe_oxygen_pct(&self) -> f64 {
        min_safe_oxygen(self.age, self.conditions())
    }

    fn add_or_skip(&mut self, tag: &str) {
        if let Err(_e) = self.add_condition(tag) {
            log_warn!("Health profile: skipping condition {:?}: {}", tag, _e);
        }
    }

    fn extend_csv(&mut self, conditions: &str) {
        for tag in conditions.split(',') {
            self.add_or_skip(tag);
        }
    }
}

fn normalize_tag(tag: &str) -> ProfileResult<ConditionTag> {
    let mut normalized = ConditionTag::new();
    for c in tag.trim().chars().flat_map(char::to_lowercase) {
        normalized
            .push(c)
            .map_err(|_| ProfileError::TagTooLong { max: MAX_CONDITION_TAG_LEN })?;
    }
    Ok(normalized)
}

/// Wire form: `{ "age": 65, "conditions": ["asthma"] }`
///
/// `conditions` may also be the comma-separated string of user records.
/// Tags are added one at a time through the lenient path, so oversized input
/// never rejects the whole profile.
#[cfg(feature = "serde")]
mod wire {
    use core::fmt;

    use serde::{
        de::{self, DeserializeSeed, IgnoredAny, MapAccess, SeqAccess, Visitor},
        ser::SerializeStruct,
        Deserialize, Deserializer, Serialize, Serializer,
    };

    use super::HealthProfile;

    impl Serialize for HealthProfile {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut state = serializer.serialize_struct("HealthProfile", 2)?;
            state.serialize_field("age", &self.age)?;
            state.serialize_field("conditions", &Conditions(self))?;
            state.end()
        }
    }

    struct Conditions<'a>(&'a HealthProfile);

    impl Serialize for Conditions<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_seq(self.0.conditions())
        }
    }

    #[derive(Deserialize)]
    #[serde(field_identifier, rename_all = "lowercase")]
    enum Field {
        Age,
        Conditions,
        #[serde(other)]
        Other,
    }

    impl<'de> Deserialize<'de> for HealthProfile {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_struct("HealthProfile", &["age", "conditions"], ProfileVisitor)
        }
    }

    struct ProfileVisitor;

    impl<'de> Visitor<'de> for ProfileVisitor {
        type Value = HealthProfile;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a health profile with optional `age` and `conditions`")
        }

        fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<HealthProfile, M::Error> {
            let mut profile = HealthProfile::default();
            while let Some(field) = map.next_key::<Field>()? {
                match field {
                    Field::Age => profile.age = map.next_value()?,
                    Field::Conditions => map.next_value_seed(ConditionSink(&mut profile))?,
                    Field::Other => {
                        map.next_value::<IgnoredAny>()?;
                    }
                }
            }
            Ok(profile)
        }
    }

    /// Feeds a `conditions` list (or CSV string) into a profile
    struct ConditionSink<'a>(&'a mut HealthProfile);

    impl<'de> DeserializeSeed<'de> for ConditionSink<'_> {
        type Value = ();

        fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
            deserializer.deserialize_any(self)
        }
    }

    impl<'de> Visitor<'de> for ConditionSink<'_> {
        type Value = ();

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of condition tags or a comma-separated string")
        }

        fn visit_seq<S: SeqAccess<'de>>(self, mut seq: S) -> Result<(), S::Error> {
            while seq.next_element_seed(TagSink(&mut *self.0))?.is_some() {}
            Ok(())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
            self.0.extend_csv(v);
            Ok(())
        }

        fn visit_none<E: de::Error>(self) -> Result<(), E> {
            Ok(())
        }

        fn visit_unit<E: de::Error>(self) -> Result<(), E> {
            Ok(())
        }
    }

    /// Feeds one tag into a profile
    struct TagSink<'a>(&'a mut HealthProfile);

    impl<'de> DeserializeSeed<'de> for TagSink<'_> {
        type Value = ();

        fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
            deserializer.deserialize_str(self)
        }
    }

    impl<'de> Visitor<'de> for TagSink<'_> {
        type Value = ();

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a condition tag")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<(), E> {
            self.0.add_or_skip(v);
            Ok(())
        }
    }
}
