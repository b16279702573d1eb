use firebase::{Document, Value};

use crate::types::{Profile, Sex};

const NICKNAME: &str = "nickname";
const GOAL_WEIGHT: &str = "goalWeight";
const GOAL_FAT: &str = "goalFat";
const GOAL_MUSCLE: &str = "goalMuscle";
const HEIGHT: &str = "height";
const SEX: &str = "sex";

/// Field names match the documents written by the web client.
pub fn profile_to_document(profile: &Profile) -> Document {
    Document::new()
        .with_field(NICKNAME, Value::string(&profile.nickname))
        .with_field(GOAL_WEIGHT, Value::string(&profile.goal_weight))
        .with_field(GOAL_FAT, Value::string(&profile.goal_fat))
        .with_field(GOAL_MUSCLE, Value::string(&profile.goal_muscle))
        .with_field(HEIGHT, Value::string(&profile.height))
        .with_field(
            SEX,
            Value::string(profile.sex.map(Sex::as_str).unwrap_or_default()),
        )
}

pub fn profile_from_document(doc: &Document) -> Profile {
    let text = |name: &str| doc.text(name).unwrap_or_default();
    Profile {
        nickname: text(NICKNAME),
        goal_weight: text(GOAL_WEIGHT),
        goal_fat: text(GOAL_FAT),
        goal_muscle: text(GOAL_MUSCLE),
        height: text(HEIGHT),
        sex: Sex::parse(&text(SEX)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_web_client_document_with_native_numbers() {
        let raw = r#"{
            "fields": {
                "nickname": {"stringValue": "ぴよ"},
                "goalWeight": {"stringValue": "52"},
                "goalFat": {"integerValue": "11"},
                "height": {"doubleValue": 158.5},
                "sex": {"stringValue": "female"}
            }
        }"#;
        let doc: Document = serde_json::from_str(raw).unwrap();
        let profile = profile_from_document(&doc);

        assert_eq!(profile.nickname, "ぴよ");
        assert_eq!(profile.goal_weight, "52");
        assert_eq!(profile.goal_fat, "11");
        assert_eq!(profile.goal_muscle, "");
        assert_eq!(profile.height, "158.5");
        assert_eq!(profile.sex, Some(Sex::Female));
    }

    #[test]
    fn unset_sex_is_written_as_empty_string() {
        let doc = profile_to_document(&Profile::with_nickname("piyo"));
        assert_eq!(doc.fields.get(SEX), Some(&Value::string("")));
        assert_eq!(doc.fields.len(), 6);
        assert_eq!(profile_from_document(&doc).sex, None);
    }
}
