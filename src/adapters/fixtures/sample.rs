//! Sample data for every record type, used by the API tests and local runs.

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};

use crate::domain::expenditure::Expenditure;
use crate::domain::foundation::{Money, Record, Repository, ValidationError};
use crate::domain::project::{Partnership, Project, SdgRole};
use crate::domain::reference::{
    Organisation, PartnershipType, SamplingActivity, SamplingDocumentType, Sdg,
};
use crate::domain::sampling::{MediaReference, SamplingDocumentation};
use crate::domain::staff::{StaffMember, StaffRole};

use super::{Fixture, FixtureContext, FixtureError, FixtureLoader, Repositories};

const API_GROUP: &[&str] = &["api"];

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, FixtureError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        ValidationError::invalid_format("date", format!("{year}-{month}-{day}")).into()
    })
}

fn money(dollars: i64) -> Result<Money, FixtureError> {
    Ok(Money::try_new(dollars)?)
}

macro_rules! reference_fixture {
    ($fixture:ident, $record:ident, $name:literal, $repository:ident, $value:literal) => {
        pub struct $fixture;

        #[async_trait]
        impl Fixture for $fixture {
            fn name(&self) -> &'static str {
                $name
            }

            fn groups(&self) -> &'static [&'static str] {
                API_GROUP
            }

            async fn load(
                &self,
                repositories: &Repositories,
                context: &mut FixtureContext,
            ) -> Result<(), FixtureError> {
                let mut record = $record::new($value);
                repositories.$repository.save(&mut record).await?;
                context.add_reference($name, record.key())
            }
        }
    };
}

reference_fixture!(OrganisationFixture, Organisation, "organisation", organisations, "ILRI");
reference_fixture!(
    PartnershipTypeFixture,
    PartnershipType,
    "partnership-type",
    partnership_types,
    "Research partner"
);
reference_fixture!(SdgFixture, Sdg, "sdg", sdgs, "Zero hunger");
reference_fixture!(
    SamplingActivityFixture,
    SamplingActivity,
    "sampling-activity",
    sampling_activities,
    "Soil sampling"
);
reference_fixture!(
    SamplingDocumentTypeFixture,
    SamplingDocumentType,
    "sampling-document-type",
    sampling_document_types,
    "Field protocol"
);

/// Two staff members: one with split roles, one without roles.
pub struct StaffMemberFixture;

#[async_trait]
impl Fixture for StaffMemberFixture {
    fn name(&self) -> &'static str {
        "staff-member"
    }

    fn groups(&self) -> &'static [&'static str] {
        API_GROUP
    }

    async fn load(
        &self,
        repositories: &Repositories,
        context: &mut FixtureContext,
    ) -> Result<(), FixtureError> {
        let mut member = StaffMember::new();
        member
            .set_username("jdoe")
            .set_email("j.doe@cgiar.org")
            .set_first_name("Jane")
            .set_last_name("Doe")
            .set_home_program("Livestock Genetics");
        for percent in [60.0, 40.0] {
            let mut role = StaffRole::new();
            role.set_percent(percent);
            member.add_staff_role(role);
        }
        repositories.staff_members.save(&mut member).await?;
        context.add_reference("staff-member", member.key())?;

        let mut colleague = StaffMember::new();
        colleague
            .set_username("asmith")
            .set_email("a.smith@cgiar.org")
            .set_home_program("Feed and Forage");
        repositories.staff_members.save(&mut colleague).await?;
        context.add_reference("staff-member-no-roles", colleague.key())
    }
}

/// A project led by the `staff-member` reference.
pub struct ProjectFixture;

#[async_trait]
impl Fixture for ProjectFixture {
    fn name(&self) -> &'static str {
        "project"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["staff-member"]
    }

    fn groups(&self) -> &'static [&'static str] {
        API_GROUP
    }

    async fn load(
        &self,
        repositories: &Repositories,
        context: &mut FixtureContext,
    ) -> Result<(), FixtureError> {
        let mut project = Project::new();
        project
            .set_ilri_code("ILRI-0001")
            .set_full_name("Livestock and climate")
            .set_principal_investigator(Some(context.get_reference("staff-member")?))
            .set_start_date(date(2019, 1, 1)?)
            .set_end_date(Some(date(2022, 12, 31)?));
        repositories.projects.save(&mut project).await?;
        context.add_reference("project", project.key())
    }
}

pub struct SdgRoleFixture;

#[async_trait]
impl Fixture for SdgRoleFixture {
    fn name(&self) -> &'static str {
        "sdg-role"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["project", "sdg"]
    }

    fn groups(&self) -> &'static [&'static str] {
        API_GROUP
    }

    async fn load(
        &self,
        repositories: &Repositories,
        context: &mut FixtureContext,
    ) -> Result<(), FixtureError> {
        let mut role = SdgRole::new();
        role.set_project(context.get_reference("project")?)?
            .set_sdg(context.get_reference("sdg")?)?
            .set_percent(0.5);
        repositories.sdg_roles.save(&mut role).await?;
        context.add_reference("sdg-role", role.key())
    }
}

pub struct PartnershipFixture;

#[async_trait]
impl Fixture for PartnershipFixture {
    fn name(&self) -> &'static str {
        "partnership"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["project", "organisation", "partnership-type"]
    }

    fn groups(&self) -> &'static [&'static str] {
        API_GROUP
    }

    async fn load(
        &self,
        repositories: &Repositories,
        context: &mut FixtureContext,
    ) -> Result<(), FixtureError> {
        let mut partnership = Partnership::new();
        partnership
            .set_project(Some(context.get_reference("project")?))
            .set_partner(Some(context.get_reference("organisation")?))
            .set_partnership_type(Some(context.get_reference("partnership-type")?));
        repositories.partnerships.save(&mut partnership).await?;
        context.add_reference("partnership", partnership.key())
    }
}

pub struct ExpenditureFixture;

#[async_trait]
impl Fixture for ExpenditureFixture {
    fn name(&self) -> &'static str {
        "expenditure"
    }

    fn groups(&self) -> &'static [&'static str] {
        API_GROUP
    }

    async fn load(
        &self,
        repositories: &Repositories,
        context: &mut FixtureContext,
    ) -> Result<(), FixtureError> {
        let report_date = Utc
            .with_ymd_and_hms(2020, 6, 30, 12, 0, 0)
            .single()
            .ok_or_else(|| ValidationError::invalid_format("reportDate", "2020-06-30T12:00:00Z"))?;
        let mut expenditure = Expenditure::new();
        expenditure
            .set_ilri_code("ILRI-0001-EXP")
            .set_name("Field work")
            .set_home_program("Livestock Genetics")
            .set_start_date(date(2020, 1, 1)?)
            .set_end_date(Some(date(2020, 12, 31)?))
            .set_report_date(report_date)
            .set_total_budget(Some(money(250_000)?))
            .set_amount(Some(money(125_000)?));
        repositories.expenditures.save(&mut expenditure).await?;
        context.add_reference("expenditure", expenditure.key())
    }
}

pub struct SamplingDocumentationFixture;

#[async_trait]
impl Fixture for SamplingDocumentationFixture {
    fn name(&self) -> &'static str {
        "sampling-documentation"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["sampling-activity", "sampling-document-type"]
    }

    fn groups(&self) -> &'static [&'static str] {
        API_GROUP
    }

    async fn load(
        &self,
        repositories: &Repositories,
        context: &mut FixtureContext,
    ) -> Result<(), FixtureError> {
        let mut documentation = SamplingDocumentation::new();
        documentation
            .set_sampling_activity(Some(context.get_reference("sampling-activity")?))
            .set_sampling_document_type(Some(context.get_reference("sampling-document-type")?))
            .set_document(Some(MediaReference::file("protocol.pdf", "application/pdf")?));
        repositories
            .sampling_documentation
            .save(&mut documentation)
            .await?;
        context.add_reference("sampling-documentation", documentation.key())
    }
}

/// A loader with every sample fixture registered.
pub fn default_fixtures() -> Result<FixtureLoader, FixtureError> {
    let mut loader = FixtureLoader::new();
    loader
        .add(OrganisationFixture)?
        .add(PartnershipTypeFixture)?
        .add(SdgFixture)?
        .add(SamplingActivityFixture)?
        .add(SamplingDocumentTypeFixture)?
        .add(StaffMemberFixture)?
        .add(ProjectFixture)?
        .add(SdgRoleFixture)?
        .add(PartnershipFixture)?
        .add(ExpenditureFixture)?
        .add(SamplingDocumentationFixture)?;
    Ok(loader)
}
