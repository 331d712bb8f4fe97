use atrium_core::{ContactFields, ContactStatus, ContactSubmission};
use chrono::{TimeDelta, TimeZone, Utc};

use super::*;
use crate::state::NoticeLevel;

fn contact(i: usize) -> ContactSubmission {
  ContactFields {
    name:    format!("Person {i}"),
    email:   format!("p{i}@example.com"),
    phone:   None,
    company: None,
    subject: "Hello".into(),
    message: "Hi there".into(),
  }
  .into_record(format!("c{i}"), Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap())
}

fn loaded(n: usize) -> TableState<ContactSubmission> {
  let records = (0..n).map(contact).collect();
  reduce(TableState::new(), Action::Loaded(records))
}

fn at() -> DateTime<Utc> { Utc.timestamp_opt(1_800_000_000, 0).unwrap() }

fn run(
  state: TableState<ContactSubmission>,
  actions: impl IntoIterator<Item = Action<ContactSubmission>>,
) -> TableState<ContactSubmission> {
  actions.into_iter().fold(state, reduce)
}

#[test]
fn load_lifecycle() {
  let state = reduce(TableState::<ContactSubmission>::new(), Action::LoadStarted);
  assert_eq!(state.load, LoadState::Loading);

  let failed = reduce(state.clone(), Action::LoadFailed("boom".into()));
  assert_eq!(failed.load, LoadState::Failed("boom".into()));
  assert!(failed.records.is_empty());

  let ready = reduce(state, Action::Loaded(vec![contact(1)]));
  assert_eq!(ready.load, LoadState::Ready);
  assert_eq!(ready.records.len(), 1);
}

#[test]
fn changing_filters_resets_page() {
  let state = run(loaded(25), [Action::GoToPage(3)]);
  assert_eq!(state.page, 3);

  let searched = reduce(state.clone(), Action::SetQuery("person".into()));
  assert_eq!(searched.page, 1);

  let filtered = reduce(
    state,
    Action::SetStatusFilter(StatusFilter::Only(ContactStatus::New)),
  );
  assert_eq!(filtered.page, 1);
}

#[test]
fn page_navigation_is_bounded() {
  let state = run(loaded(25), [Action::GoToPage(99)]);
  assert_eq!(state.page, 3);
  let state = run(state, [Action::NextPage]);
  assert_eq!(state.page, 3);
  let state = run(state, [Action::PrevPage, Action::PrevPage, Action::PrevPage]);
  assert_eq!(state.page, 1);
  assert_eq!(run(loaded(0), [Action::GoToPage(5)]).page, 1);
}

#[test]
fn current_page_shows_the_right_slice() {
  let state = run(loaded(25), [Action::GoToPage(3)]);
  let page = state.current_page();
  assert_eq!(page.items.len(), 5);
  assert_eq!(page.items[0].id, "c20");
  assert_eq!(page.total_pages, 3);
}

#[test]
fn twenty_three_records_leave_three_on_the_last_page() {
  let state = loaded(23);
  assert_eq!(state.total_pages(), 3);

  let state = run(state, [Action::NextPage, Action::NextPage]);
  assert_eq!(state.page, 3);
  let page = state.current_page();
  assert_eq!(page.items.len(), 3);
  assert_eq!(page.items[0].id, "c20");
  assert!(!page.has_next());
}

#[test]
fn status_patch_touches_only_its_record() {
  let before = loaded(3);
  let after = reduce(
    before.clone(),
    Action::Applied {
      patch: Patched::Status { id: "c1".into(), status: ContactStatus::Replied },
      at:    at(),
    },
  );
  assert_eq!(after.records[1].status, ContactStatus::Replied);
  assert_eq!(after.records[0], before.records[0]);
  assert_eq!(after.records[2], before.records[2]);
  let notice = after.notice.unwrap();
  assert_eq!(notice.level, NoticeLevel::Success);
  assert_eq!(notice.message, "Status updated");
}

#[test]
fn failed_mutation_leaves_records_alone() {
  let before = loaded(3);
  let after = reduce(
    before.clone(),
    Action::MutationFailed { message: "Server unavailable".into(), at: at() },
  );
  assert_eq!(after.records, before.records);
  let notice = after.notice.unwrap();
  assert_eq!(notice.level, NoticeLevel::Error);
  assert_eq!(notice.message, "Server unavailable");
}

#[test]
fn deleting_last_row_of_last_page_returns_to_first_page() {
  let state = run(loaded(21), [Action::GoToPage(3), Action::RequestDelete("c20".into())]);
  assert_eq!(state.page, 3);
  assert!(matches!(&state.modal, Modal::ConfirmDelete { id } if id == "c20"));

  let state = reduce(
    state,
    Action::Applied { patch: Patched::Removed { id: "c20".into() }, at: at() },
  );
  assert_eq!(state.records.len(), 20);
  assert_eq!(state.page, 1);
  assert_eq!(state.modal, Modal::None);
}

#[test]
fn deleting_a_missing_record_changes_nothing_else() {
  let before = loaded(3);
  let after = reduce(
    before.clone(),
    Action::Applied { patch: Patched::Removed { id: "gone".into() }, at: at() },
  );
  assert_eq!(after.records, before.records);
}

#[test]
fn status_change_can_move_a_record_out_of_view() {
  let state = run(loaded(11), [
    Action::SetStatusFilter(StatusFilter::Only(ContactStatus::New)),
    Action::GoToPage(2),
  ]);
  assert_eq!(state.current_page().items.len(), 1);

  let state = reduce(
    state,
    Action::Applied {
      patch: Patched::Status { id: "c10".into(), status: ContactStatus::Archived },
      at:    at(),
    },
  );
  assert_eq!(state.visible().len(), 10);
  assert_eq!(state.page, 1);
}

#[test]
fn edit_flow() {
  let state = run(loaded(2), [
    Action::OpenEdit("c0".into()),
    Action::EditRejected({
      let mut e = FieldErrors::new();
      e.insert("name", "is required");
      e.insert("email", "must be a valid email address");
      e
    }),
    Action::EditField { name: "name".into(), value: "Ada".into() },
  ]);
  let Modal::Edit { id, draft, errors } = &state.modal else {
    panic!("edit modal should be open");
  };
  assert_eq!(id, "c0");
  assert_eq!(draft.name, "Ada");
  assert_eq!(errors.get("name"), None);
  assert!(errors.get("email").is_some());
  // Nothing is merged until the backend confirms.
  assert_eq!(state.records[0].name, "Person 0");

  let mut fields = draft.clone();
  fields.subject = "Renamed".into();
  let state = reduce(
    state,
    Action::Applied { patch: Patched::Fields { id: "c0".into(), fields }, at: at() },
  );
  assert_eq!(state.modal, Modal::None);
  assert_eq!(state.records[0].name, "Ada");
  assert_eq!(state.records[0].subject, "Renamed");
  assert_eq!(state.records[0].created_at, contact(0).created_at);
}

#[test]
fn open_edit_ignores_unknown_ids() {
  let state = run(loaded(1), [Action::OpenEdit("nope".into())]);
  assert_eq!(state.modal, Modal::None);
}

#[test]
fn notices_expire_after_five_seconds() {
  let raised = at();
  let state = reduce(
    loaded(1),
    Action::MutationFailed { message: "nope".into(), at: raised },
  );

  let state = reduce(state, Action::ExpireNotice { now: raised + TimeDelta::seconds(4) });
  assert!(state.notice.is_some());

  let state = reduce(state, Action::ExpireNotice { now: raised + TimeDelta::seconds(5) });
  assert!(state.notice.is_none());
}

#[test]
fn dismiss_clears_notice() {
  let state = run(loaded(1), [
    Action::MutationFailed { message: "nope".into(), at: at() },
    Action::DismissNotice,
  ]);
  assert!(state.notice.is_none());
}
