//! Specialist directory listing
//!
//! Four steps: personal and contact details with an optional photo,
//! professional profile, practice location, then biography and terms.

use crate::form::definition::{options, ChoiceOption, FieldSpec, FormDefinition, StepDefinition};
use crate::validation::DEFAULT_MAX_UPLOAD_BYTES;

pub const NAME: &str = "directory";

const SPECIALIZATIONS: &[&str] = &[
    "Epilepsy",
    "Neurodevelopmental Disorders",
    "Autism Spectrum Disorders",
    "Movement Disorders",
    "ADHD",
    "Other",
];

const COUNTRIES: &[&str] = &[
    "Kenya",
    "Uganda",
    "Tanzania",
    "Rwanda",
    "Burundi",
    "Ethiopia",
    "South Sudan",
];

/// Options whose value and label are the same text
fn plain_options(values: &[&str]) -> Vec<ChoiceOption> {
    values.iter().map(|v| ChoiceOption::new(*v, *v)).collect()
}

pub fn definition() -> FormDefinition {
    FormDefinition::new(
        NAME,
        "Join the Specialist Directory",
        vec![personal(), professional(), location(), additional()],
    )
    .with_description("List your practice in the public directory of child neurology specialists.")
}

fn personal() -> StepDefinition {
    StepDefinition::new(
        "personal",
        "Personal",
        vec![
            FieldSpec::text("firstName", "First name").required(),
            FieldSpec::text("lastName", "Last name").required(),
            FieldSpec::email("email", "Email").required(),
            FieldSpec::phone("phone", "Phone number").required(),
            FieldSpec::file("photo", "Profile photo", DEFAULT_MAX_UPLOAD_BYTES),
        ],
    )
}

fn professional() -> StepDefinition {
    StepDefinition::new(
        "professional",
        "Professional",
        vec![
            FieldSpec::text("title", "Professional title").required(),
            FieldSpec::single_choice("specialization", "Specialization", plain_options(SPECIALIZATIONS))
                .required(),
            FieldSpec::text("otherSpecialization", "Other specialization")
                .required_when_equals("specialization", "Other")
                .message("Please specify your specialization"),
            FieldSpec::multi_choice(
                "languages",
                "Language",
                options(&[
                    ("english", "English"),
                    ("swahili", "Swahili"),
                    ("french", "French"),
                    ("kinyarwanda", "Kinyarwanda"),
                    ("luganda", "Luganda"),
                    ("luo", "Luo"),
                    ("other", "Other"),
                ]),
            )
            .required(),
            FieldSpec::text("otherLanguage", "Other language")
                .required_when_checked("languages", "other")
                .message("Please specify the other language"),
        ],
    )
}

fn location() -> StepDefinition {
    StepDefinition::new(
        "location",
        "Location",
        vec![
            FieldSpec::text("hospital", "Hospital/Institution").required(),
            FieldSpec::text("city", "City").required(),
            FieldSpec::single_choice("country", "Country", plain_options(COUNTRIES)).required(),
        ],
    )
}

fn additional() -> StepDefinition {
    StepDefinition::new(
        "additional",
        "Additional",
        vec![
            FieldSpec::long_text("bio", "Professional bio").required(),
            FieldSpec::long_text("education", "Education"),
            FieldSpec::long_text("certifications", "Certifications"),
            FieldSpec::consent("acceptTerms", "I accept the terms and conditions")
                .required()
                .message("You must accept the terms and conditions"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::session::FormSession;
    use crate::models::FileAttachment;

    #[test]
    fn test_definition_is_consistent() {
        let form = definition();
        assert!(form.check().is_ok());
        assert_eq!(form.total_steps(), 4);
        assert!(form.secret_fields().is_empty());
    }

    #[test]
    fn test_other_specialization_required_only_for_other() {
        let mut session = FormSession::new(definition()).unwrap();
        for (name, value) in [
            ("firstName", "Peter"),
            ("lastName", "Okello"),
            ("email", "p.okello@mulago.ug"),
            ("phone", "+256 772 123 456"),
        ] {
            session.update_field(name, value).unwrap();
        }
        session.advance_step().unwrap();

        session.update_field("title", "Senior Registrar").unwrap();
        session.update_field("specialization", "Other").unwrap();
        session.update_field("languages.luganda", true).unwrap();
        let err = session.advance_step().unwrap_err();
        assert_eq!(
            err.as_step_blocked().unwrap().fields(),
            vec!["otherSpecialization"]
        );
        assert_eq!(
            session.error("otherSpecialization"),
            Some("Please specify your specialization")
        );

        session.update_field("specialization", "ADHD").unwrap();
        assert_eq!(session.advance_step().unwrap(), 3);
    }

    #[test]
    fn test_oversized_photo_blocks_first_step() {
        let mut session = FormSession::new(definition()).unwrap();
        session.update_field("firstName", "Peter").unwrap();
        session.update_field("lastName", "Okello").unwrap();
        session.update_field("email", "p.okello@mulago.ug").unwrap();
        session.update_field("phone", "0772123456").unwrap();
        session
            .update_field("photo", FileAttachment::new("huge.png", 11 * 1024 * 1024))
            .unwrap();

        let err = session.advance_step().unwrap_err();
        assert_eq!(err.as_step_blocked().unwrap().fields(), vec!["photo"]);
        assert_eq!(session.error("photo"), Some("File size must be less than 10MB"));
    }

    #[test]
    fn test_no_language_selected() {
        let mut session = FormSession::new(definition()).unwrap();
        session.update_field("title", "Dr").unwrap();
        session.update_field("specialization", "Epilepsy").unwrap();

        let errors = session.validate_step(2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "languages");
        assert_eq!(errors[0].message, "Please select at least one language");
    }
}
