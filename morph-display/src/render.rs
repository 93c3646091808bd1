use std::fmt;

use morph_model::{GroupMember, Homonym, Inflection, InflectionGroup};
use serde_json::{Value, json};

const INDENT: &str = "  ";

/// Displays groups as a tree: one line per group with its key, one line per
/// inflection with its features.
pub struct Tree<'a>(pub &'a [InflectionGroup]);

impl fmt::Display for Tree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in self.0 {
            write_group(f, group, 0)?;
        }
        Ok(())
    }
}

fn write_group(f: &mut fmt::Formatter<'_>, group: &InflectionGroup, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    match group.sort_key() {
        Some(sort_key) => writeln!(f, "{indent}[{}] (sort {sort_key})", group.grouping_key())?,
        None => writeln!(f, "{indent}[{}]", group.grouping_key())?,
    }
    for member in group.members() {
        match member {
            GroupMember::Nested(child) => write_group(f, child, depth + 1)?,
            GroupMember::Leaf(inflection) => writeln!(
                f,
                "{indent}{INDENT}{inflection}  {}",
                describe_features(inflection)
            )?,
        }
    }
    Ok(())
}

fn describe_features(inflection: &Inflection) -> String {
    inflection
        .features()
        .map(|(kind, features)| {
            let values: Vec<String> = features.iter().map(|f| f.to_string()).collect();
            format!("{kind}: {}", values.join(", "))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// A JSON summary of the homonym and its display groups.
pub fn summary(homonym: &Homonym, groups: &[InflectionGroup]) -> Value {
    json!({
        "target_word": homonym.target_word(),
        "language": homonym.language().ok(),
        "lemmas": homonym
            .lexemes()
            .iter()
            .map(|lexeme| json!({
                "word": lexeme.lemma().word(),
                "meaning": lexeme.meaning(),
                "translations": lexeme.lemma().translation().map(|t| t.translations()),
                "inflections": lexeme.inflections().len(),
            }))
            .collect::<Vec<_>>(),
        "groups": groups.iter().map(group_json).collect::<Vec<_>>(),
    })
}

fn group_json(group: &InflectionGroup) -> Value {
    let members: Vec<Value> = group
        .members()
        .iter()
        .map(|member| match member {
            GroupMember::Nested(child) => group_json(child),
            GroupMember::Leaf(inflection) => inflection_json(inflection),
        })
        .collect();
    json!({
        "key": group.grouping_key().to_string(),
        "sort_key": group.sort_key(),
        "members": members,
    })
}

fn inflection_json(inflection: &Inflection) -> Value {
    let features: serde_json::Map<String, Value> = inflection
        .features()
        .map(|(kind, features)| {
            let values: Vec<String> = features.iter().map(|f| f.to_string()).collect();
            (kind.to_string(), json!(values))
        })
        .collect();
    json!({
        "form": inflection.to_string(),
        "stem": inflection.stem(),
        "prefix": inflection.prefix(),
        "suffix": inflection.suffix(),
        "example": inflection.example(),
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use morph_model::{
        Feature, FeatureKind, LanguageRegistry, Lemma, Lexeme, Translation, group_for_display,
    };

    fn adverb() -> Inflection {
        let registry = LanguageRegistry::classical().unwrap();
        let mut inflection = Inflection::new("ben", "lat", &registry)
            .unwrap()
            .with_suffix("e");
        inflection
            .add_feature(Feature::new("adverb", FeatureKind::PartOfSpeech, "lat").unwrap())
            .unwrap();
        inflection
    }

    #[test]
    fn test_tree() {
        let groups = group_for_display([adverb()]);
        let expected = "\
[part of speech=\"adverb\"; comparison=; dialect=; prefix=\"\"; stem=\"ben\"; suffix=\"e\"] (sort 1)
  [part of speech=\"adverb\"; is_case_inflection_set=false]
    [tense=; voice=] (sort 1)
      [case=; comparison=; gender=; number=; person=; tense=; mood=; sort=; voice=]
        ben-e  part of speech: adverb
";
        assert_eq!(Tree(&groups).to_string(), expected);
    }

    #[test]
    fn test_summary() {
        let lemma = Lemma::new("bene", "lat")
            .unwrap()
            .with_translation(Translation::new("bene", "lat-eng", vec!["well".to_string()]).unwrap());
        let lexeme = Lexeme::new(lemma, vec![adverb()]).with_meaning("well");
        let homonym = Homonym::new(vec![lexeme], Some("bene".to_string()));
        let groups = group_for_display(homonym.inflections().cloned());
        let summary = summary(&homonym, &groups);

        assert_eq!(summary["language"], "lat");
        assert_eq!(summary["lemmas"][0]["meaning"], "well");
        assert_eq!(summary["lemmas"][0]["translations"][0], "well");
        let top = &summary["groups"][0];
        assert_eq!(top["sort_key"], 1);
        let leaf = &top["members"][0]["members"][0]["members"][0]["members"][0];
        assert_eq!(leaf["form"], "ben-e");
        assert_eq!(leaf["prefix"], Value::Null);
        assert_eq!(leaf["features"]["part of speech"][0], "adverb");
    }
}
