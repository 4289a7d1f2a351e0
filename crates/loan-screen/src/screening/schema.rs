use serde::{Deserialize, Deserializer, Serialize};

/// Categorical fields in the order the encoder was fitted on.
pub const CATEGORICAL_FIELDS: [&str; 9] = [
    "gender",
    "marital_status",
    "bank_customer",
    "education",
    "ethnicity",
    "prior_default",
    "employed",
    "drivers_license",
    "citizen",
];

/// Numerical fields in the order the scaler was fitted on.
pub const NUMERICAL_FIELDS: [&str; 5] = ["age", "debt", "years_employed", "credit_score", "income"];

pub const DEBT_INDEX: usize = 1;
pub const CREDIT_SCORE_INDEX: usize = 3;
pub const INCOME_INDEX: usize = 4;

/// Application record consumed by the decision pipeline.
///
/// Categorical values are canonical strings; numeric inputs sent as integers
/// (e.g. a `prior_default` of `1`) are kept as their decimal spelling.
/// `zip_code` is carried for the caller's records only and never modeled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(deserialize_with = "deserialize_category")]
    pub gender: String,
    pub age: f64,
    pub debt: f64,
    #[serde(deserialize_with = "deserialize_category")]
    pub marital_status: String,
    #[serde(deserialize_with = "deserialize_category")]
    pub bank_customer: String,
    #[serde(deserialize_with = "deserialize_category")]
    pub education: String,
    #[serde(deserialize_with = "deserialize_category")]
    pub ethnicity: String,
    pub years_employed: f64,
    #[serde(deserialize_with = "deserialize_category")]
    pub prior_default: String,
    #[serde(deserialize_with = "deserialize_category")]
    pub employed: String,
    pub credit_score: f64,
    #[serde(deserialize_with = "deserialize_category")]
    pub drivers_license: String,
    #[serde(deserialize_with = "deserialize_category")]
    pub citizen: String,
    #[serde(default)]
    pub zip_code: String,
    pub income: f64,
}

impl LoanApplication {
    /// Categorical values ordered as [`CATEGORICAL_FIELDS`].
    pub fn categorical_values(&self) -> [&str; 9] {
        [
            &self.gender,
            &self.marital_status,
            &self.bank_customer,
            &self.education,
            &self.ethnicity,
            &self.prior_default,
            &self.employed,
            &self.drivers_license,
            &self.citizen,
        ]
    }

    /// Numerical values ordered as [`NUMERICAL_FIELDS`].
    pub fn numerical_values(&self) -> [f64; 5] {
        [
            self.age,
            self.debt,
            self.years_employed,
            self.credit_score,
            self.income,
        ]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CategoryRepr {
    Text(String),
    Integer(i64),
}

fn deserialize_category<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match CategoryRepr::deserialize(deserializer)? {
        CategoryRepr::Text(value) => value,
        CategoryRepr::Integer(value) => value.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    pub const DOMAIN: [&'static str; 2] = ["M", "F"];

    pub const fn label(self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Married,
    Single,
    Divorced,
}

impl MaritalStatus {
    pub const DOMAIN: [&'static str; 3] = ["Married", "Single", "Divorced"];

    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Married => "Married",
            MaritalStatus::Single => "Single",
            MaritalStatus::Divorced => "Divorced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Education {
    Bachelors,
    Masters,
    PhD,
    #[serde(rename = "High School")]
    HighSchool,
    Other,
}

impl Education {
    pub const DOMAIN: [&'static str; 5] = ["Bachelors", "Masters", "PhD", "High School", "Other"];

    pub const fn label(self) -> &'static str {
        match self {
            Education::Bachelors => "Bachelors",
            Education::Masters => "Masters",
            Education::PhD => "PhD",
            Education::HighSchool => "High School",
            Education::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ethnicity {
    Asian,
    Black,
    White,
}

impl Ethnicity {
    pub const DOMAIN: [&'static str; 3] = ["Asian", "Black", "White"];

    pub const fn label(self) -> &'static str {
        match self {
            Ethnicity::Asian => "Asian",
            Ethnicity::Black => "Black",
            Ethnicity::White => "White",
        }
    }
}

/// Shared answer type for the yes/no questions on the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    pub const DOMAIN: [&'static str; 2] = ["Yes", "No"];

    pub const fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }
}

/// Valid categories per field, ordered as [`CATEGORICAL_FIELDS`].
pub fn categorical_domains() -> [&'static [&'static str]; 9] {
    [
        &Gender::DOMAIN,
        &MaritalStatus::DOMAIN,
        &YesNo::DOMAIN,
        &Education::DOMAIN,
        &Ethnicity::DOMAIN,
        &YesNo::DOMAIN,
        &YesNo::DOMAIN,
        &YesNo::DOMAIN,
        &YesNo::DOMAIN,
    ]
}

/// Typed request accepted at the HTTP and CLI boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationRequest {
    pub gender: Gender,
    pub age: i64,
    pub debt: f64,
    pub marital_status: MaritalStatus,
    pub bank_customer: YesNo,
    pub education: Education,
    pub ethnicity: Ethnicity,
    pub years_employed: f64,
    pub prior_default: YesNo,
    pub employed: YesNo,
    pub credit_score: i64,
    pub drivers_license: YesNo,
    pub citizen: YesNo,
    pub zip_code: String,
    pub income: f64,
}

impl LoanApplicationRequest {
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        for (field, value) in [
            ("debt", self.debt),
            ("years_employed", self.years_employed),
            ("income", self.income),
        ] {
            if !value.is_finite() {
                return Err(SchemaViolation::NotFinite { field });
            }
        }

        if self.income <= 0.0 {
            return Err(SchemaViolation::NotPositive { field: "income" });
        }

        Ok(())
    }

    /// Validate and convert the closed enumerations into the canonical
    /// strings the encoder was fitted on.
    pub fn into_application(self) -> Result<LoanApplication, SchemaViolation> {
        self.validate()?;

        Ok(LoanApplication {
            gender: self.gender.label().to_string(),
            age: self.age as f64,
            debt: self.debt,
            marital_status: self.marital_status.label().to_string(),
            bank_customer: self.bank_customer.label().to_string(),
            education: self.education.label().to_string(),
            ethnicity: self.ethnicity.label().to_string(),
            years_employed: self.years_employed,
            prior_default: self.prior_default.label().to_string(),
            employed: self.employed.label().to_string(),
            credit_score: self.credit_score as f64,
            drivers_license: self.drivers_license.label().to_string(),
            citizen: self.citizen.label().to_string(),
            zip_code: self.zip_code,
            income: self.income,
        })
    }
}

/// Request rejected before reaching the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}
