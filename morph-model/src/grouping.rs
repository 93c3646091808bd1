//! Arranges a flat set of inflections into the four-level tree used for display.
//!
//! 1. lexical identity: part of speech, comparison, dialect and the literal affixes
//! 2. primary axis: number for case-inflected forms, otherwise tense, otherwise a
//!    verb or adverb bucket, otherwise a catch-all bucket
//! 3. tense and voice
//! 4. the full agreement signature
//!
//! Partitioning keeps first-appearance order. Levels 1 and 3 are then stable-sorted
//! by descending sort key.

use indexmap::IndexMap;

use crate::feature::FeatureKind;
use crate::grouping_key::{IS_CASE_INFLECTION_SET, InflectionGroupingKey, KeyExtra, PREFIX, STEM, SUFFIX};
use crate::inflection::Inflection;
use crate::inflection_group::{GroupMember, InflectionGroup, sort_siblings};

const LEXICAL_KINDS: [FeatureKind; 3] = [
    FeatureKind::PartOfSpeech,
    FeatureKind::Comparison,
    FeatureKind::Dialect,
];

const TENSE_VOICE_KINDS: [FeatureKind; 2] = [FeatureKind::Tense, FeatureKind::Voice];

const AGREEMENT_KINDS: [FeatureKind; 9] = [
    FeatureKind::Case,
    FeatureKind::Comparison,
    FeatureKind::Gender,
    FeatureKind::Number,
    FeatureKind::Person,
    FeatureKind::Tense,
    FeatureKind::Mood,
    FeatureKind::Sort,
    FeatureKind::Voice,
];

/// Sort order assumed for a feature, or a slot, that has none.
const DEFAULT_SORT_ORDER: u32 = 1;

struct Pass {
    name: &'static str,
    key: fn(&Inflection) -> InflectionGroupingKey,
    sort_key: Option<fn(&Inflection) -> u32>,
}

const PASSES: [Pass; 4] = [
    Pass {
        name: "lexical",
        key: lexical_key,
        sort_key: Some(part_of_speech_sort_key),
    },
    Pass {
        name: "primary axis",
        key: primary_axis_key,
        sort_key: None,
    },
    Pass {
        name: "tense and voice",
        key: tense_voice_key,
        sort_key: Some(case_sort_key),
    },
    Pass {
        name: "agreement",
        key: agreement_key,
        sort_key: None,
    },
];

/// Groups inflections for display. Returns the top-level groups; each one is four
/// levels deep with the inflections at the bottom. Never fails: a missing feature
/// keys as an empty slot.
pub fn group_for_display(inflections: impl IntoIterator<Item = Inflection>) -> Vec<InflectionGroup> {
    group_level(inflections.into_iter().collect(), &PASSES)
}

fn group_level(inflections: Vec<Inflection>, passes: &[Pass]) -> Vec<InflectionGroup> {
    let Some((pass, rest)) = passes.split_first() else {
        return Vec::new();
    };

    let count = inflections.len();
    let mut buckets: IndexMap<InflectionGroupingKey, (Option<u32>, Vec<Inflection>)> =
        IndexMap::new();
    for inflection in inflections {
        let key = (pass.key)(&inflection);
        let (_, members) = buckets.entry(key).or_insert_with_key(|key| {
            log::trace!("{} pass: new group [{key}]", pass.name);
            (pass.sort_key.map(|sort_key| sort_key(&inflection)), Vec::new())
        });
        members.push(inflection);
    }
    log::debug!(
        "{} pass: {count} inflections in {} groups",
        pass.name,
        buckets.len()
    );

    let mut groups: Vec<InflectionGroup> = buckets
        .into_iter()
        .map(|(key, (sort_key, members))| {
            let members = if rest.is_empty() {
                members.into_iter().map(GroupMember::Leaf).collect()
            } else {
                group_level(members, rest)
                    .into_iter()
                    .map(GroupMember::Nested)
                    .collect()
            };
            InflectionGroup::from_parts(key, members, sort_key)
        })
        .collect();

    if pass.sort_key.is_some() {
        sort_siblings(&mut groups);
    }
    groups
}

fn lexical_key(inflection: &Inflection) -> InflectionGroupingKey {
    InflectionGroupingKey::new(
        inflection,
        &LEXICAL_KINDS,
        [
            (PREFIX, KeyExtra::from(inflection.prefix())),
            (STEM, KeyExtra::from(inflection.stem())),
            (SUFFIX, KeyExtra::from(inflection.suffix())),
        ],
    )
}

fn primary_axis_key(inflection: &Inflection) -> InflectionGroupingKey {
    let is_case_inflection_set = inflection.has_feature(FeatureKind::Case);
    let kinds: &[FeatureKind] = if is_case_inflection_set {
        &[FeatureKind::Number]
    } else if inflection.has_feature(FeatureKind::Tense) {
        &[FeatureKind::Tense]
    } else if is_part_of_speech(inflection, "verb") || is_part_of_speech(inflection, "adverb") {
        &[FeatureKind::PartOfSpeech]
    } else {
        &[]
    };
    InflectionGroupingKey::new(
        inflection,
        kinds,
        [(IS_CASE_INFLECTION_SET, is_case_inflection_set)],
    )
}

fn tense_voice_key(inflection: &Inflection) -> InflectionGroupingKey {
    InflectionGroupingKey::from_features(inflection, &TENSE_VOICE_KINDS)
}

fn agreement_key(inflection: &Inflection) -> InflectionGroupingKey {
    InflectionGroupingKey::from_features(inflection, &AGREEMENT_KINDS)
}

/// The part of speech is exactly `value`: one feature holding that single value.
fn is_part_of_speech(inflection: &Inflection, value: &str) -> bool {
    match inflection.feature(FeatureKind::PartOfSpeech) {
        [feature] => feature.value().values() == [value],
        _ => false,
    }
}

fn max_sort_order(inflection: &Inflection, kind: FeatureKind) -> u32 {
    inflection
        .feature(kind)
        .iter()
        .map(|f| f.sort_order().unwrap_or(DEFAULT_SORT_ORDER))
        .max()
        .unwrap_or(DEFAULT_SORT_ORDER)
}

fn part_of_speech_sort_key(inflection: &Inflection) -> u32 {
    max_sort_order(inflection, FeatureKind::PartOfSpeech)
}

fn case_sort_key(inflection: &Inflection) -> u32 {
    max_sort_order(inflection, FeatureKind::Case)
}
