//! Shooting site model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use reelbook_core::types::DbId;
use reelbook_core::validation::choice_or_first;
use reelbook_core::{sites, timestamps};
use serde::{Deserialize, Serialize};

use crate::store::Record;

/// A row of `shooting_sites.csv`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    pub id: DbId,
    pub site_name: String,
    pub address: String,
    pub status: String,
    /// ISO-8601 datetime text. Kept raw so a malformed value still loads.
    pub visit_datetime: String,
    pub note: String,
}

impl Record for Site {
    const TABLE: &'static str = "shooting_sites.csv";
    const HEADERS: &'static [&'static str] =
        &["id", "site_name", "address", "status", "visit_datetime", "note"];
    const ENTITY: &'static str = "Site";

    fn id(&self) -> DbId {
        self.id
    }
}

/// DTO for creating a site.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSite {
    pub site_name: String,
    pub address: Option<String>,
    /// Defaults to `not_scouted`.
    pub status: Option<String>,
    /// Defaults to today.
    pub visit_date: Option<NaiveDate>,
    /// Defaults to 09:00.
    pub visit_time: Option<NaiveTime>,
    pub note: Option<String>,
}

/// DTO for editing a site. All fields are optional.
///
/// A lone `visit_date` or `visit_time` is merged with the other part of the
/// stored visit datetime.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSite {
    pub site_name: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub visit_date: Option<NaiveDate>,
    pub visit_time: Option<NaiveTime>,
    pub note: Option<String>,
}

/// Edit-form view of a site with the stored visit datetime split and repaired.
#[derive(Debug, Clone, Serialize)]
pub struct SiteEditView {
    pub id: DbId,
    pub site_name: String,
    pub address: String,
    pub status: &'static str,
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub note: String,
}

impl Site {
    /// Prefill view for the edit form.
    pub fn edit_view(&self) -> SiteEditView {
        let visit = timestamps::datetime_or(&self.visit_datetime, sites::default_visit_datetime());
        SiteEditView {
            id: self.id,
            site_name: self.site_name.clone(),
            address: self.address.clone(),
            status: choice_or_first(&self.status, sites::SITE_STATUSES),
            visit_date: visit.date(),
            visit_time: visit.time(),
            note: self.note.clone(),
        }
    }
}
