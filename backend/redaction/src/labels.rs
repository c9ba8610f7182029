//! Field labels that introduce PII on a form line ("SSN: ...", "DOB - ...").
//!
//! Matching is case-insensitive, so each phrase is listed once in lower case.
//! Some entries are deliberately broad (`id`, `number`, `address`): any line
//! where such a word precedes a separator has its value masked.

/// A group of label phrases for one kind of identifier.
#[derive(Debug, Clone, Copy)]
pub struct LabelCategory {
    pub name: &'static str,
    pub labels: &'static [&'static str],
}

pub static PII_LABELS: &[LabelCategory] = &[
    LabelCategory {
        name: "Government Issued ID",
        labels: &[
            "government issued id", "govt issued id", "gov issued id",
            "gov issued identification", "gov id", "govt id", "government id",
            "government identification", "id issued by government",
            "government identity card", "id card", "identity card",
            "identification id", "official id", "official identification",
            "national id", "national identification", "gov identity",
        ],
    },
    LabelCategory {
        name: "Social Security Number",
        labels: &[
            "social security number", "ssn", "s.s.n.", "social security no",
            "ss number", "soc sec no", "ssn number", "social sec number",
            "social security #",
        ],
    },
    LabelCategory {
        name: "Tax ID",
        labels: &[
            "tax id", "tax identification number", "tin", "t.i.n.", "tax no",
            "tax number", "taxpayer id", "tax payer number",
        ],
    },
    LabelCategory {
        name: "Federal Employer ID",
        labels: &[
            "federal employer id", "employer id", "employer identification",
            "feid", "f.e.i.d.",
        ],
    },
    LabelCategory {
        name: "FEIN",
        labels: &[
            "fein", "f.e.i.n.", "federal employer identification number",
            "fein number", "federal ein", "employer ein",
        ],
    },
    LabelCategory {
        name: "Driver's License",
        labels: &[
            "driver's license", "driver' s license", "license", "drivers license",
            "driver license", "driving license", "dl number", "dl", "d.l.",
            "license number", "driver id",
        ],
    },
    LabelCategory {
        name: "Identification Card",
        labels: &[
            "identification card", "identity card", "id", "identification",
            "id number", "identification number",
        ],
    },
    LabelCategory {
        name: "Passport",
        labels: &[
            "passport", "passport number", "passport no", "pp number", "passport id",
        ],
    },
    LabelCategory {
        name: "Military ID",
        labels: &[
            "military id", "army id", "navy id", "airforce id", "defense id",
            "military identification",
        ],
    },
    LabelCategory {
        name: "Date of Birth",
        labels: &[
            "date of birth", "dob", "birth date", "birth info", "d.o.b.",
            "date born", "born on", "birthdate",
        ],
    },
    LabelCategory {
        name: "Home Address",
        labels: &[
            "home address", "residential address", "residence address", "address",
            "addr", "street address", "street addr", "residential addr",
        ],
    },
    LabelCategory {
        name: "Home Telephone Number",
        labels: &[
            "home telephone number", "telephone number", "home phone", "landline",
            "tel number",
        ],
    },
    LabelCategory {
        name: "Cell Phone Number",
        labels: &[
            "cell phone number", "mobile number", "mobile no", "cell number",
            "phone number", "contact number", "contact no", "ph number", "cell no",
        ],
    },
    LabelCategory {
        name: "Email Address",
        labels: &[
            "email address", "email", "e-mail", "email id", "mail id", "gmail", "g-mail",
        ],
    },
    LabelCategory {
        name: "Social Media Contact Information",
        labels: &[
            "social media contact information", "social media info", "social handle",
            "social contact", "social media account",
        ],
    },
    LabelCategory {
        name: "Health Insurance Policy Number",
        labels: &[
            "health insurance policy number", "insurance policy number",
            "policy number", "policy no", "health insurance number",
            "insurance number",
        ],
    },
    LabelCategory {
        name: "Medical Record Number",
        labels: &[
            "medical record number", "mrn", "medical record no", "med record number",
            "medical", "record", "number",
        ],
    },
    LabelCategory {
        name: "Claim Number",
        labels: &["claim number", "claim no", "claim id"],
    },
    LabelCategory {
        name: "Patient Account Number",
        labels: &["patient account number", "patient id", "patient account"],
    },
    LabelCategory {
        name: "File Number",
        labels: &["file number", "file no", "file id", "file reference"],
    },
    LabelCategory {
        name: "Chart Number",
        labels: &["chart number", "chart no", "chart id"],
    },
    LabelCategory {
        name: "Individual Financial Account Number",
        labels: &[
            "individual financial account number", "financial account number",
            "financial account", "account number",
        ],
    },
    LabelCategory {
        name: "Bank Account Number",
        labels: &["bank account number", "bank no", "account no", "acct number"],
    },
    LabelCategory {
        name: "Financial Information",
        labels: &["financial information", "financial data", "financial details"],
    },
    LabelCategory {
        name: "Credit Card Number",
        labels: &["credit card number", "credit card", "card number", "cc number", "card no"],
    },
];

/// Every label phrase in table order, first occurrence only.
pub fn all_labels() -> Vec<&'static str> {
    let mut seen = std::collections::HashSet::new();
    PII_LABELS
        .iter()
        .flat_map(|category| category.labels.iter().copied())
        .filter(|label| seen.insert(label.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_twenty_five_categories() {
        assert_eq!(PII_LABELS.len(), 25);
    }

    #[test]
    fn labels_are_unique_and_ordered() {
        let labels = all_labels();
        assert_eq!(labels[0], "government issued id");
        // "identity card" appears in two categories but is kept once.
        assert_eq!(labels.iter().filter(|l| **l == "identity card").count(), 1);
        assert!(labels.contains(&"credit card number"));
    }
}
