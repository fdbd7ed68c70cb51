//! Integration tests for repository CRUD, cascades and id assignment.
//!
//! Each test runs against a fresh temporary data directory.

use assert_matches::assert_matches;
use chrono::NaiveDate;
use reelbook_core::attachments::FileType;
use reelbook_core::timestamps::hm;
use reelbook_db::models::asset::NewAsset;
use reelbook_db::models::attachment::NewAttachment;
use reelbook_db::models::department::{CreateDepartment, UpdateDepartment};
use reelbook_db::models::editing_task::{CreateEditingTask, UpdateEditingTask};
use reelbook_db::models::meal::CreateMeal;
use reelbook_db::models::schedule::{CreateSchedule, Schedule};
use reelbook_db::models::script::{CreateScript, UpdateScript};
use reelbook_db::models::site::{CreateSite, Site, UpdateSite};
use reelbook_db::models::storyboard::CreateStoryboard;
use reelbook_db::repositories::{
    AssetRepo, AttachmentRepo, DepartmentRepo, EditingTaskRepo, MealRepo, ScheduleRepo,
    ScriptRepo, SiteRepo, StoryboardRepo,
};
use reelbook_db::DataStore;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open() -> (TempDir, DataStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = DataStore::open(dir.path()).unwrap();
    (dir, store)
}

fn new_site(name: &str) -> CreateSite {
    CreateSite {
        site_name: name.to_string(),
        address: None,
        status: None,
        visit_date: None,
        visit_time: None,
        note: None,
    }
}

fn new_script(title: &str) -> CreateScript {
    CreateScript {
        category: None,
        title: title.to_string(),
        content: None,
        version: None,
        is_approved: None,
    }
}

fn new_asset(site_id: i64, name: &str) -> NewAsset {
    NewAsset {
        site_id,
        file_name: name.to_string(),
        file_path: format!("assets/{name}"),
        file_type: FileType::Image,
        note: String::new(),
    }
}

fn new_attachment(module: &str, ref_id: i64, name: &str) -> NewAttachment {
    NewAttachment {
        module: module.to_string(),
        ref_id,
        title: name.to_string(),
        file_name: name.to_string(),
        file_path: format!("uploads/{module}/{name}"),
        file_type: FileType::Pdf,
        note: String::new(),
    }
}

// ---------------------------------------------------------------------------
// Id assignment
// ---------------------------------------------------------------------------

#[test]
fn first_record_gets_id_one() {
    let (_dir, store) = open();
    let site = SiteRepo::create(&store, &new_site("Harbour")).unwrap();
    assert_eq!(site.id, 1);
}

#[test]
fn existing_id_three_yields_four() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("departments.csv"),
        "id,dept_type,name,role,contact,note\n3,camera,Lee,DP,,\n",
    )
    .unwrap();
    let store = DataStore::open(dir.path()).unwrap();

    let created = DepartmentRepo::create(
        &store,
        &CreateDepartment {
            dept_type: None,
            name: "Kim".to_string(),
            role: None,
            contact: None,
            note: None,
        },
    )
    .unwrap();
    assert_eq!(created.id, 4);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let (_dir, store) = open();
    SiteRepo::create(&store, &new_site("A")).unwrap();
    let b = SiteRepo::create(&store, &new_site("B")).unwrap();
    SiteRepo::delete(&store, b.id).unwrap();

    let c = SiteRepo::create(&store, &new_site("C")).unwrap();
    assert_eq!(c.id, 3);
}

// ---------------------------------------------------------------------------
// Defaults and updates
// ---------------------------------------------------------------------------

#[test]
fn site_defaults_and_partial_visit_update() {
    let (_dir, store) = open();
    let mut input = new_site("Warehouse");
    input.visit_date = NaiveDate::from_ymd_opt(2024, 5, 1);
    let site = SiteRepo::create(&store, &input).unwrap();
    assert_eq!(site.status, "not_scouted");
    assert_eq!(site.visit_datetime, "2024-05-01T09:00:00");

    let update = UpdateSite {
        visit_time: Some(hm(15, 30)),
        ..Default::default()
    };
    let updated = SiteRepo::update(&store, site.id, &update).unwrap().unwrap();
    assert_eq!(updated.visit_datetime, "2024-05-01T15:30:00");
    assert_eq!(updated.site_name, "Warehouse");
}

#[test]
fn malformed_visit_datetime_falls_back_on_edit() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("shooting_sites.csv"),
        "id,site_name,address,status,visit_datetime,note\n1,Dock,,weird,not-a-date,\n",
    )
    .unwrap();
    let store = DataStore::open(dir.path()).unwrap();

    let site: Site = SiteRepo::find_by_id(&store, 1).unwrap().unwrap();
    let view = site.edit_view();
    assert_eq!(view.status, "not_scouted");
    assert_eq!(view.visit_time, hm(9, 0));
}

#[test]
fn script_defaults_and_update_bumps_timestamp() {
    let (_dir, store) = open();
    let script = ScriptRepo::create(&store, &new_script("Founder interview")).unwrap();
    assert_eq!(script.version, "v1.0");
    assert!(!script.is_approved);
    assert!(!script.updated_at.is_empty());

    let update = UpdateScript {
        is_approved: Some(true),
        ..Default::default()
    };
    let updated = ScriptRepo::update(&store, script.id, &update).unwrap().unwrap();
    assert!(updated.is_approved);
    assert_eq!(updated.title, "Founder interview");
}

#[test]
fn stored_flag_spellings_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("scripts.csv"),
        "id,category,title,content,version,is_approved,updated_at\n\
         1,,A,,v1.0,True,\n2,,B,,v1.0,0,\n",
    )
    .unwrap();
    let store = DataStore::open(dir.path()).unwrap();
    let scripts = ScriptRepo::list(&store).unwrap();
    assert!(scripts[0].is_approved);
    assert!(!scripts[1].is_approved);
}

#[test]
fn editing_task_defaults() {
    let (_dir, store) = open();
    let task = EditingTaskRepo::create(
        &store,
        &CreateEditingTask {
            clip_name: "Teaser".to_string(),
            clip_type: None,
            editor: None,
            status: None,
            version: None,
            note: None,
        },
    )
    .unwrap();
    assert_eq!(task.clip_type, "feature");
    assert_eq!(task.status, "not_started");
    assert_eq!(task.version, "v0.1");

    let update = UpdateEditingTask {
        status: Some("final".to_string()),
        ..Default::default()
    };
    let updated = EditingTaskRepo::update(&store, task.id, &update).unwrap().unwrap();
    assert_eq!(updated.status, "final");
}

#[test]
fn missing_records_report_none() {
    let (_dir, store) = open();
    assert!(SiteRepo::find_by_id(&store, 7).unwrap().is_none());
    assert!(DepartmentRepo::update(&store, 7, &UpdateDepartment::default())
        .unwrap()
        .is_none());
    assert_matches!(SiteRepo::delete(&store, 7), Ok(None));
    assert!(!MealRepo::delete(&store, 7).unwrap());
}

// ---------------------------------------------------------------------------
// Cascades
// ---------------------------------------------------------------------------

#[test]
fn deleting_site_removes_only_its_assets() {
    let (_dir, store) = open();
    let keep = SiteRepo::create(&store, &new_site("Keep")).unwrap();
    let gone = SiteRepo::create(&store, &new_site("Gone")).unwrap();
    AssetRepo::create_batch(
        &store,
        vec![
            new_asset(gone.id, "a.png"),
            new_asset(gone.id, "b.png"),
            new_asset(keep.id, "c.png"),
        ],
    )
    .unwrap();

    assert_matches!(SiteRepo::delete(&store, gone.id), Ok(Some(2)));
    assert!(AssetRepo::list_by_site(&store, gone.id).unwrap().is_empty());
    assert_eq!(AssetRepo::list_by_site(&store, keep.id).unwrap().len(), 1);
}

#[test]
fn deleting_script_removes_its_storyboards() {
    let (_dir, store) = open();
    let script = ScriptRepo::create(&store, &new_script("Opening")).unwrap();
    let other = ScriptRepo::create(&store, &new_script("Closing")).unwrap();
    for script_id in [script.id, script.id, other.id] {
        StoryboardRepo::create(
            &store,
            &CreateStoryboard {
                script_id,
                ..Default::default()
            },
        )
        .unwrap();
    }

    assert_matches!(ScriptRepo::delete(&store, script.id), Ok(Some(2)));
    let remaining = StoryboardRepo::list(&store).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].script_id, other.id);
    assert_eq!(remaining[0].shot_no, "1A");
}

#[test]
fn attachments_survive_parent_delete() {
    let (_dir, store) = open();
    let site = SiteRepo::create(&store, &new_site("Roof")).unwrap();
    AttachmentRepo::create_batch(&store, vec![new_attachment("site", site.id, "permit.pdf")])
        .unwrap();
    SiteRepo::delete(&store, site.id).unwrap();
    assert_eq!(AttachmentRepo::list_for(&store, "site", site.id).unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[test]
fn attachments_are_filtered_by_module_and_ref() {
    let (_dir, store) = open();
    AttachmentRepo::create_batch(
        &store,
        vec![
            new_attachment("site", 1, "a.pdf"),
            new_attachment("site", 2, "b.pdf"),
            new_attachment("meal", 1, "c.pdf"),
        ],
    )
    .unwrap();

    let listed = AttachmentRepo::list_for(&store, "site", 1).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].file_name, "a.pdf");
    assert_eq!(listed[0].kind(), FileType::Pdf);
}

#[test]
fn empty_attachment_batch_writes_nothing() {
    let (dir, store) = open();
    let created = AttachmentRepo::create_batch(&store, Vec::new()).unwrap();
    assert!(created.is_empty());
    assert!(!dir.path().join("attachments.csv").exists());
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[test]
fn schedules_are_listed_chronologically() {
    let (_dir, store) = open();
    let day = |d| NaiveDate::from_ymd_opt(2024, 6, d);
    for (d, h) in [(2, 9), (1, 14), (1, 8)] {
        ScheduleRepo::create(
            &store,
            &CreateSchedule {
                date: day(d),
                start_time: Some(hm(h, 0)),
                location: Some(format!("{d}-{h}")),
                ..Default::default()
            },
        )
        .unwrap();
    }
    let order: Vec<String> = ScheduleRepo::list(&store)
        .unwrap()
        .into_iter()
        .map(|s: Schedule| s.location)
        .collect();
    assert_eq!(order, vec!["1-8", "1-14", "2-9"]);
}

#[test]
fn malformed_meal_time_keeps_stored_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("meals.csv"),
        "id,date,meal_type,time,people,vendor,note\n\
         1,2024-06-02,lunch,12:00:00,,,\n\
         2,2024-06-01,lunch,noon,,,\n",
    )
    .unwrap();
    let store = DataStore::open(dir.path()).unwrap();
    let ids: Vec<i64> = MealRepo::list(&store).unwrap().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2]);

    let created = MealRepo::create(&store, &CreateMeal::default()).unwrap();
    assert_eq!(created.id, 3);
    assert_eq!(created.time, "12:00:00");
}
