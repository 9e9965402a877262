//! Association membership application
//!
//! Three steps: personal details with account password, professional and
//! educational background, then fee tier, payment method and declarations.

use crate::form::definition::{options, FieldSpec, FormDefinition, StepDefinition};

pub const NAME: &str = "membership";

pub fn definition() -> FormDefinition {
    FormDefinition::new(
        NAME,
        "Membership Application",
        vec![personal(), professional(), payment()],
    )
    .with_description(
        "Apply to join the association as an ordinary, associate, student, \
         institutional or honorary member.",
    )
}

fn personal() -> StepDefinition {
    StepDefinition::new(
        "personal",
        "Personal Information",
        vec![
            FieldSpec::text("firstName", "First name").required(),
            FieldSpec::text("middleName", "Middle name"),
            FieldSpec::text("lastName", "Last name").required(),
            FieldSpec::single_choice(
                "gender",
                "Gender",
                options(&[("male", "Male"), ("female", "Female")]),
            )
            .required(),
            FieldSpec::single_choice(
                "nationality",
                "Nationality",
                options(&[
                    ("kenyan", "Kenyan"),
                    ("ugandan", "Ugandan"),
                    ("tanzanian", "Tanzanian"),
                    ("south_sudanese", "South Sudanese"),
                    ("rwandese", "Rwandese"),
                    ("burundian", "Burundian"),
                    ("ethiopian", "Ethiopian"),
                    ("somalian", "Somalian"),
                ]),
            )
            .required(),
            FieldSpec::single_choice(
                "countryOfResidence",
                "Country of residence",
                options(&[
                    ("kenya", "Kenya"),
                    ("uganda", "Uganda"),
                    ("tanzania", "Tanzania"),
                    ("burundi", "Burundi"),
                    ("south_sudan", "South Sudan"),
                    ("rwanda", "Rwanda"),
                    ("ethiopia", "Ethiopia"),
                    ("somalia", "Somalia"),
                ]),
            )
            .required(),
            FieldSpec::email("email", "Email").required(),
            FieldSpec::phone("phone", "Phone number").required(),
            FieldSpec::text("idNumber", "ID number"),
            FieldSpec::password("password", "Password").required(),
            FieldSpec::confirm_password("confirmPassword", "Confirm password", "password")
                .required(),
        ],
    )
}

fn professional() -> StepDefinition {
    StepDefinition::new(
        "professional",
        "Professional Information",
        vec![
            FieldSpec::single_choice(
                "membershipType",
                "Membership category",
                options(&[
                    ("ordinary", "Ordinary Member"),
                    ("associate", "Associate Member"),
                    ("student", "Student Member"),
                    ("institutional", "Institutional Member"),
                    ("honorary", "Honorary Member"),
                ]),
            )
            .required()
            .message("Membership type is required"),
            FieldSpec::text("currentProfession", "Current profession").required(),
            FieldSpec::text("institution", "Institution").required(),
            FieldSpec::text("workAddress", "Work address").required(),
            FieldSpec::text("registrationNumber", "Medical registration/licensure number"),
            FieldSpec::text("highestDegree", "Highest degree earned").required(),
            FieldSpec::text("university", "University/institution").required(),
        ],
    )
}

fn payment() -> StepDefinition {
    StepDefinition::new(
        "payment",
        "Payment & Declaration",
        vec![
            FieldSpec::single_choice(
                "membershipFee",
                "Membership fee",
                options(&[
                    ("full", "Full Membership ($150/year)"),
                    ("associate", "Associate Membership ($100/year)"),
                    ("student", "Student Membership ($50/year)"),
                    ("institutional", "Institutional Membership ($500/year)"),
                    ("honorary", "Honorary Membership (no fee)"),
                ]),
            )
            .required(),
            FieldSpec::single_choice(
                "paymentMethod",
                "Payment method",
                options(&[
                    ("bank", "Bank Transfer"),
                    ("mobile", "Mobile Money (Mpesa)"),
                    ("online", "Online Payment (card)"),
                ]),
            )
            .required(),
            FieldSpec::consent(
                "certifyInfo",
                "I certify that the information provided is true and complete",
            )
            .required()
            .message("You must certify that the information is accurate"),
            FieldSpec::consent(
                "consentData",
                "I consent to the use of my data for official communication",
            )
            .required()
            .message("You must consent to data use"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::session::{FormSession, SubmissionState};
    use crate::form::submission::Submission;
    use crate::error::SubmissionError;

    #[test]
    fn test_definition_is_consistent() {
        let form = definition();
        assert!(form.check().is_ok());
        assert_eq!(form.total_steps(), 3);
        assert_eq!(form.step_of("confirmPassword"), Some(1));
        assert_eq!(form.step_of("paymentMethod"), Some(3));
    }

    #[test]
    fn test_optional_fields() {
        let form = definition();
        for name in ["middleName", "idNumber", "registrationNumber"] {
            assert!(!form.field(name).unwrap().required, "{} should be optional", name);
        }
    }

    #[test]
    fn test_full_application() {
        let mut session = FormSession::new(definition()).unwrap();
        for (name, value) in [
            ("firstName", "Jane"),
            ("lastName", "Mwangi"),
            ("gender", "female"),
            ("nationality", "kenyan"),
            ("countryOfResidence", "kenya"),
            ("email", "jane.mwangi@example.org"),
            ("phone", "+254712345678"),
            ("password", "Neuro2024!"),
            ("confirmPassword", "Neuro2024!"),
        ] {
            session.update_field(name, value).unwrap();
        }
        assert_eq!(session.advance_step().unwrap(), 2);

        let err = session.advance_step().unwrap_err();
        assert_eq!(
            err.as_step_blocked().unwrap().first_field(),
            Some("membershipType")
        );
        assert_eq!(session.error("membershipType"), Some("Membership type is required"));

        for (name, value) in [
            ("membershipType", "ordinary"),
            ("currentProfession", "Paediatric neurologist"),
            ("institution", "Aga Khan University Hospital"),
            ("workAddress", "3rd Parklands Avenue, Nairobi"),
            ("highestDegree", "MMed Paediatrics"),
            ("university", "University of Nairobi"),
        ] {
            session.update_field(name, value).unwrap();
        }
        assert_eq!(session.advance_step().unwrap(), 3);

        session.update_field("membershipFee", "full").unwrap();
        session.update_field("paymentMethod", "mobile").unwrap();
        session.update_field("certifyInfo", true).unwrap();
        session.update_field("consentData", true).unwrap();

        let mut sink = |s: &Submission| -> Result<(), SubmissionError> {
            assert_eq!(s.fields.len(), 19);
            Ok(())
        };
        assert_eq!(session.submit(&mut sink).unwrap(), SubmissionState::Completed);
    }
}
