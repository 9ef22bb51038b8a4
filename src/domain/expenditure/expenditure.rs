//! Expenditure entity: a budget line reported against an ILRI code.

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::foundation::{
    AttributeValue, Constraint, ExpenditureId, Money, Record, RecordKey, Rule, Validate,
};

/// A reported expenditure.
///
/// `total_budget` and `amount` are whole dollars; both are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct Expenditure {
    key: RecordKey,
    id: Option<ExpenditureId>,
    ilri_code: Option<String>,
    name: Option<String>,
    home_program: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    report_date: Option<DateTime<Utc>>,
    total_budget: Option<Money>,
    amount: Option<Money>,
}

impl Expenditure {
    pub fn new() -> Self {
        Self {
            key: RecordKey::new(),
            id: None,
            ilri_code: None,
            name: None,
            home_program: None,
            start_date: None,
            end_date: None,
            report_date: None,
            total_budget: None,
            amount: None,
        }
    }

    /// Reconstitute an expenditure from persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        key: RecordKey,
        id: ExpenditureId,
        ilri_code: Option<String>,
        name: Option<String>,
        home_program: Option<String>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        report_date: Option<DateTime<Utc>>,
        total_budget: Option<Money>,
        amount: Option<Money>,
    ) -> Self {
        Self {
            key,
            id: Some(id),
            ilri_code,
            name,
            home_program,
            start_date,
            end_date,
            report_date,
            total_budget,
            amount,
        }
    }

    pub fn ilri_code(&self) -> Option<&str> {
        self.ilri_code.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn home_program(&self) -> Option<&str> {
        self.home_program.as_deref()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    pub fn report_date(&self) -> Option<DateTime<Utc>> {
        self.report_date
    }

    pub fn total_budget(&self) -> Option<Money> {
        self.total_budget
    }

    pub fn amount(&self) -> Option<Money> {
        self.amount
    }

    pub fn set_ilri_code(&mut self, code: impl Into<String>) -> &mut Self {
        self.ilri_code = Some(code.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn set_home_program(&mut self, home_program: impl Into<String>) -> &mut Self {
        self.home_program = Some(home_program.into());
        self
    }

    pub fn set_start_date(&mut self, date: NaiveDate) -> &mut Self {
        self.start_date = Some(date);
        self
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDate>) -> &mut Self {
        self.end_date = date;
        self
    }

    pub fn set_report_date(&mut self, at: DateTime<Utc>) -> &mut Self {
        self.report_date = Some(at);
        self
    }

    pub fn set_total_budget(&mut self, budget: Option<Money>) -> &mut Self {
        self.total_budget = budget;
        self
    }

    pub fn set_amount(&mut self, amount: Option<Money>) -> &mut Self {
        self.amount = amount;
        self
    }
}

impl Default for Expenditure {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for Expenditure {
    const ENTITY: &'static str = "Expenditure";
    const CONSTRAINTS: &'static [Constraint] = &[
        Constraint::new("ilriCode", Rule::NotBlank),
        Constraint::new("name", Rule::NotBlank),
        Constraint::new("homeProgram", Rule::NotBlank),
        Constraint::new("startDate", Rule::NotBlank),
        Constraint::new("reportDate", Rule::NotBlank),
    ];

    fn attribute(&self, name: &str) -> Option<AttributeValue<'_>> {
        match name {
            "ilriCode" => Some(AttributeValue::Text(self.ilri_code.as_deref())),
            "name" => Some(AttributeValue::Text(self.name.as_deref())),
            "homeProgram" => Some(AttributeValue::Text(self.home_program.as_deref())),
            "startDate" => Some(AttributeValue::Present(self.start_date.is_some())),
            "endDate" => Some(AttributeValue::Present(self.end_date.is_some())),
            "reportDate" => Some(AttributeValue::Present(self.report_date.is_some())),
            "totalBudget" => Some(AttributeValue::Present(self.total_budget.is_some())),
            "amount" => Some(AttributeValue::Present(self.amount.is_some())),
            _ => None,
        }
    }
}

impl Record for Expenditure {
    type Id = ExpenditureId;

    const ATTRIBUTES: &'static [&'static str] = &[
        "id",
        "ilriCode",
        "name",
        "homeProgram",
        "startDate",
        "endDate",
        "reportDate",
        "totalBudget",
        "amount",
    ];

    fn key(&self) -> RecordKey {
        self.key
    }

    fn id(&self) -> Option<ExpenditureId> {
        self.id
    }

    fn assign_id(&mut self, id: ExpenditureId) {
        self.id = Some(id);
    }
}
