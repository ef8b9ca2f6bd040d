use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::TimeDelta;
use services::{
    AudioSink, Cue, Notice, Pick, PracticeStart, Presenter, RoundView, SessionController,
    SessionError,
};
use storage::profile_store::profile_key;
use storage::{InMemoryStore, KeyValueStore, ProfileStore, StorageError};
use zhuyin_core::GenerateError;
use zhuyin_core::engine::PickOutcome;
use zhuyin_core::model::{
    CellId, MistakeKind, Mode, PracticeKind, ProfileId, ProfileSnapshot, Roster, RosterError,
    Round, Symbol, SymbolCatalog,
};
use zhuyin_core::time::fixed_clock;

//
// ─── FIXTURES ──────────────────────────────────────────────────────────────────
//

fn catalog(symbols: &[&str], sequences: &[&[&str]]) -> SymbolCatalog {
    SymbolCatalog::new(
        symbols.iter().copied().map(Symbol::from).collect(),
        sequences
            .iter()
            .map(|seq| seq.iter().copied().map(Symbol::from).collect())
            .collect(),
    )
    .unwrap()
}

fn letters() -> SymbolCatalog {
    catalog(&["A", "B", "C", "D", "E"], &[])
}

fn xyz() -> SymbolCatalog {
    catalog(&["X", "Y", "Z", "A", "B"], &[&["X", "Y", "Z"]])
}

fn controller(catalog: SymbolCatalog, backend: &InMemoryStore) -> SessionController {
    let store = ProfileStore::new(Arc::new(backend.clone()), Roster::default());
    SessionController::new(catalog, store)
        .with_seed(7)
        .with_clock(fixed_clock())
}

fn recognition_target(c: &SessionController) -> Symbol {
    match c.round() {
        Some(Round::Recognition(round)) => round.target().clone(),
        other => panic!("expected a recognition round, got {other:?}"),
    }
}

fn wrong_option(c: &SessionController) -> Symbol {
    match c.round() {
        Some(Round::Recognition(round)) => round
            .options()
            .iter()
            .find(|s| *s != round.target())
            .cloned()
            .unwrap(),
        other => panic!("expected a recognition round, got {other:?}"),
    }
}

/// First unfound search-all cell whose target flag equals `target`.
fn search_cell(c: &SessionController, target: bool) -> CellId {
    match c.round() {
        Some(Round::SearchAll(round)) => round
            .cells()
            .iter()
            .position(|cell| cell.is_target == target && !cell.found)
            .map(CellId::new)
            .unwrap(),
        other => panic!("expected a search-all round, got {other:?}"),
    }
}

/// First unmatched sequential cell holding `symbol`.
fn sequence_cell(c: &SessionController, symbol: &str) -> CellId {
    match c.round() {
        Some(Round::Sequential(round)) => round
            .cells()
            .iter()
            .position(|cell| cell.symbol.as_str() == symbol && !cell.matched)
            .map(CellId::new)
            .unwrap(),
        other => panic!("expected a sequential round, got {other:?}"),
    }
}

fn cursor(c: &SessionController) -> usize {
    match c.round() {
        Some(Round::Sequential(round)) => round.cursor(),
        other => panic!("expected a sequential round, got {other:?}"),
    }
}

fn count(c: &SessionController, kind: MistakeKind, key: &str) -> u32 {
    c.profile().ledger().section(kind).count(key)
}

#[derive(Debug, Clone, PartialEq)]
enum Heard {
    Speak(Symbol, f32),
    Chime(Cue),
}

#[derive(Clone, Default)]
struct RecordingAudio(Rc<RefCell<Vec<Heard>>>);

impl AudioSink for RecordingAudio {
    fn speak(&mut self, symbol: &Symbol, rate: f32) {
        self.0.borrow_mut().push(Heard::Speak(symbol.clone(), rate));
    }

    fn chime(&mut self, cue: Cue) {
        self.0.borrow_mut().push(Heard::Chime(cue));
    }
}

#[derive(Clone, Default)]
struct RecordingPresenter {
    views: Rc<RefCell<Vec<RoundView>>>,
    notices: Rc<RefCell<Vec<Notice>>>,
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, view: &RoundView) {
        self.views.borrow_mut().push(view.clone());
    }

    fn notice(&mut self, notice: Notice) {
        self.notices.borrow_mut().push(notice);
    }
}

/// Reads nothing back and rejects every write.
struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read-only".into()))
    }
}

//
// ─── SCENARIOS ─────────────────────────────────────────────────────────────────
//

#[test]
fn recognition_miss_is_kept_outside_practice_and_cleared_inside() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();

    let target = recognition_target(&c);
    let report = c.submit_pick(Pick::Symbol(wrong_option(&c)));
    assert_eq!(report.outcome, PickOutcome::Miss);
    assert_eq!(c.profile().wrong_count(), 1);
    assert_eq!(c.profile().score(), 0);
    assert_eq!(count(&c, MistakeKind::RecognitionMiss, target.as_str()), 1);

    let report = c.submit_pick(Pick::Symbol(target.clone()));
    assert!(report.outcome.is_completed());
    assert_eq!(c.profile().score(), 10);
    assert_eq!(count(&c, MistakeKind::RecognitionMiss, target.as_str()), 1);

    // The only ledger entry becomes a one-round practice queue.
    let started = c.start_practice(PracticeKind::Recognition).unwrap();
    assert!(matches!(started, PracticeStart::Started(_)));
    assert_eq!(recognition_target(&c), target);

    c.submit_pick(Pick::Symbol(target.clone()));
    assert_eq!(count(&c, MistakeKind::RecognitionMiss, target.as_str()), 0);
    assert!(c.practice().is_none());
    assert_eq!(c.profile().score(), 20);
}

#[test]
fn sequential_cursor_survives_wrong_picks() {
    let backend = InMemoryStore::new();
    let mut c = controller(xyz(), &backend);
    c.switch_mode(Mode::Sequential).unwrap();

    let cell = sequence_cell(&c, "Y");
    assert_eq!(c.submit_pick(Pick::Cell(cell)).outcome, PickOutcome::Miss);
    assert_eq!(cursor(&c), 0);
    assert_eq!(count(&c, MistakeKind::Misclick, "Y"), 1);
    assert_eq!(count(&c, MistakeKind::SequenceFail, "XYZ"), 1);

    let cell = sequence_cell(&c, "X");
    assert!(c.submit_pick(Pick::Cell(cell)).outcome.is_correct());
    assert_eq!(cursor(&c), 1);

    let cell = sequence_cell(&c, "Z");
    assert_eq!(c.submit_pick(Pick::Cell(cell)).outcome, PickOutcome::Miss);
    assert_eq!(cursor(&c), 1);

    let cell = sequence_cell(&c, "Y");
    c.submit_pick(Pick::Cell(cell));
    assert_eq!(cursor(&c), 2);

    let cell = sequence_cell(&c, "Z");
    let report = c.submit_pick(Pick::Cell(cell));
    assert!(report.outcome.is_completed());
    assert_eq!(cursor(&c), 3);
    assert!(report.advance.is_some());
}

#[test]
fn profiles_are_persisted_independently() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    c.submit_pick(Pick::Symbol(wrong_option(&c)));
    let target = recognition_target(&c);
    c.submit_pick(Pick::Symbol(target));
    assert_eq!(c.profile().id(), &ProfileId::new("西瓜"));

    let p1_key = profile_key(&ProfileId::new("西瓜"));
    let p1_before = backend.get(&p1_key).unwrap().unwrap();

    c.switch_profile("柚子").unwrap();
    assert_eq!(c.profile().score(), 0);
    assert!(c.profile().ledger().is_empty());
    for _ in 0..3 {
        c.submit_pick(Pick::Symbol(wrong_option(&c)));
        let target = recognition_target(&c);
        c.submit_pick(Pick::Symbol(target));
        c.start_round().unwrap();
    }

    assert_eq!(backend.get(&p1_key).unwrap().unwrap(), p1_before);

    c.switch_profile("西瓜").unwrap();
    assert_eq!(c.profile().score(), 10);
    assert_eq!(c.profile().wrong_count(), 1);
}

#[test]
fn active_profile_survives_a_restart() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.switch_profile("安安").unwrap();
    c.submit_pick(Pick::Symbol(recognition_target(&c)));

    let restarted = controller(letters(), &backend);
    assert_eq!(restarted.profile().id(), &ProfileId::new("安安"));
    assert_eq!(restarted.profile().score(), 10);
}

#[test]
fn unknown_profile_is_rejected_without_side_effects() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    let token = c.token();

    let err = c.switch_profile("nobody").unwrap_err();
    assert!(matches!(err, SessionError::Roster(RosterError::Unknown(_))));
    assert_eq!(c.token(), token);
    assert_eq!(c.profile().id(), &ProfileId::new("西瓜"));
}

//
// ─── DELAYED ADVANCE ───────────────────────────────────────────────────────────
//

#[test]
fn advance_fires_once_for_the_current_round() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    let report = c.submit_pick(Pick::Symbol(recognition_target(&c)));
    let advance = report.advance.unwrap();
    assert_eq!(advance.token(), c.token());
    assert_eq!(advance.delay().as_millis(), 400);

    assert!(c.fire_advance(advance.token()).unwrap());
    assert_ne!(c.token(), advance.token());
    assert!(!c.round().unwrap().is_complete());

    // A second delivery of the same timer is stale.
    let token = c.token();
    assert!(!c.fire_advance(advance.token()).unwrap());
    assert_eq!(c.token(), token);
}

#[test]
fn advance_scheduled_before_a_profile_switch_is_a_no_op() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    let advance = c
        .submit_pick(Pick::Symbol(recognition_target(&c)))
        .advance
        .unwrap();

    c.switch_profile("小樂").unwrap();
    c.submit_pick(Pick::Symbol(wrong_option(&c)));
    let token = c.token();
    let before = c.profile().snapshot().clone();

    assert!(!c.fire_advance(advance.token()).unwrap());
    assert_eq!(c.token(), token);
    assert_eq!(c.profile().snapshot(), &before);
    assert!(c.pending_advance().is_none());
}

#[test]
fn advance_scheduled_before_a_mode_switch_is_a_no_op() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    let advance = c
        .submit_pick(Pick::Symbol(recognition_target(&c)))
        .advance
        .unwrap();

    c.switch_mode(Mode::SearchAll).unwrap();
    assert!(!c.fire_advance(advance.token()).unwrap());
    assert_eq!(c.mode(), Mode::SearchAll);
    assert!(matches!(c.round(), Some(Round::SearchAll(_))));
}

#[test]
fn tick_fires_only_once_due() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    let advance = c
        .submit_pick(Pick::Symbol(recognition_target(&c)))
        .advance
        .unwrap();
    let start = fixed_clock().now();
    assert_eq!(advance.due_at(), start + TimeDelta::milliseconds(400));

    assert!(!c.tick().unwrap());
    assert!(!c.tick_at(start + TimeDelta::milliseconds(399)).unwrap());
    assert!(c.tick_at(start + TimeDelta::milliseconds(400)).unwrap());
    assert!(c.pending_advance().is_none());
    assert!(!c.tick_at(start + TimeDelta::seconds(5)).unwrap());
}

//
// ─── PRACTICE ──────────────────────────────────────────────────────────────────
//

#[test]
fn recognition_practice_ends_exactly_after_the_last_queued_round() {
    let backend = InMemoryStore::new();
    let presenter = RecordingPresenter::default();
    let mut c = controller(letters(), &backend).with_presenter(Box::new(presenter.clone()));
    for _ in 0..6 {
        c.start_round().unwrap();
        c.submit_pick(Pick::Symbol(wrong_option(&c)));
        c.submit_pick(Pick::Symbol(recognition_target(&c)));
    }
    let queued = c.review(MistakeKind::RecognitionMiss, 50).len();
    assert!(queued > 0);

    c.start_practice(PracticeKind::Recognition).unwrap();
    for round in 1..=queued {
        assert!(c.practice().is_some());
        assert!(c.round().unwrap().is_practice());
        let report = c.submit_pick(Pick::Symbol(recognition_target(&c)));
        assert!(report.outcome.is_completed());
        assert_eq!(c.practice().is_some(), round < queued);
        assert!(c.fire_advance(report.advance.unwrap().token()).unwrap());
    }

    assert!(!c.round().unwrap().is_practice());
    assert_eq!(
        presenter.notices.borrow().as_slice(),
        &[Notice::PracticeFinished(PracticeKind::Recognition)]
    );
}

#[test]
fn empty_ledger_reports_nothing_to_practice() {
    let backend = InMemoryStore::new();
    let presenter = RecordingPresenter::default();
    let mut c = controller(letters(), &backend).with_presenter(Box::new(presenter.clone()));
    c.start_round().unwrap();
    let token = c.token();

    for kind in [
        PracticeKind::Recognition,
        PracticeKind::Misclick,
        PracticeKind::SequenceFail,
    ] {
        assert_eq!(
            c.start_practice(kind).unwrap(),
            PracticeStart::NothingToPractice(kind)
        );
    }
    assert_eq!(c.token(), token);
    assert_eq!(c.mode(), Mode::Recognition);
    assert!(c.practice().is_none());
    assert_eq!(presenter.notices.borrow().len(), 3);
}

#[test]
fn misclick_practice_repeats_its_target_until_stopped() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.switch_mode(Mode::SearchAll).unwrap();
    let decoy = search_cell(&c, false);
    let Some(Round::SearchAll(round)) = c.round() else {
        panic!("expected a search-all round");
    };
    let missed = round.cell(decoy).unwrap().symbol.clone();
    c.submit_pick(Pick::Cell(decoy));
    assert_eq!(count(&c, MistakeKind::Misclick, missed.as_str()), 1);

    // Starting practice from another mode switches to search-all.
    c.switch_mode(Mode::Recognition).unwrap();
    c.start_practice(PracticeKind::Misclick).unwrap();
    assert_eq!(c.mode(), Mode::SearchAll);

    for _ in 0..2 {
        let Some(Round::SearchAll(round)) = c.round() else {
            panic!("expected a search-all round");
        };
        assert_eq!(round.target(), &missed);
        assert!(round.is_practice());
        let report = loop {
            let report = c.submit_pick(Pick::Cell(search_cell(&c, true)));
            if report.outcome.is_completed() {
                break report;
            }
        };
        assert!(c.practice().is_some());
        c.fire_advance(report.advance.unwrap().token()).unwrap();
    }
    assert_eq!(count(&c, MistakeKind::Misclick, missed.as_str()), 0);

    // A manual new round keeps the session.
    c.start_round().unwrap();
    assert!(c.round().unwrap().is_practice());

    assert!(c.stop_practice());
    assert!(!c.stop_practice());
    c.start_round().unwrap();
    assert!(!c.round().unwrap().is_practice());
}

#[test]
fn sequence_practice_replays_the_most_failed_sequence() {
    let backend = InMemoryStore::new();
    let catalog = catalog(
        &["X", "Y", "Z", "P", "Q", "A", "B"],
        &[&["X", "Y", "Z"], &["P", "Q"]],
    );
    let mut c = controller(catalog, &backend);
    c.switch_mode(Mode::Sequential).unwrap();
    let Some(Round::Sequential(round)) = c.round() else {
        panic!("expected a sequential round");
    };
    let failed = round.sequence().clone();
    let decoy = round
        .cells()
        .iter()
        .position(|cell| !failed.contains(&cell.symbol))
        .map(CellId::new)
        .unwrap();
    assert_eq!(c.submit_pick(Pick::Cell(decoy)).outcome, PickOutcome::Miss);
    assert_eq!(
        count(&c, MistakeKind::SequenceFail, failed.key().as_str()),
        1
    );

    c.start_practice(PracticeKind::SequenceFail).unwrap();
    for _ in 0..3 {
        let Some(Round::Sequential(round)) = c.round() else {
            panic!("expected a sequential round");
        };
        assert_eq!(round.sequence(), &failed);
        assert!(round.is_practice());
        c.start_round().unwrap();
    }

    // A mode switch cancels practice.
    c.switch_mode(Mode::Recognition).unwrap();
    assert!(c.practice().is_none());
    c.switch_mode(Mode::Sequential).unwrap();
    assert!(!c.round().unwrap().is_practice());
}

#[test]
fn profile_switch_cancels_practice() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    c.submit_pick(Pick::Symbol(wrong_option(&c)));
    c.start_practice(PracticeKind::Recognition).unwrap();
    assert!(c.practice().is_some());

    c.switch_profile("阿噗").unwrap();
    assert!(c.practice().is_none());
    assert!(!c.round().unwrap().is_practice());
}

//
// ─── AUDIO, SETTINGS, STORAGE ──────────────────────────────────────────────────
//

#[test]
fn speech_and_chimes_follow_settings() {
    let backend = InMemoryStore::new();
    let audio = RecordingAudio::default();
    let mut c = controller(letters(), &backend).with_audio(Box::new(audio.clone()));

    c.start_round().unwrap();
    let target = recognition_target(&c);
    c.submit_pick(Pick::Symbol(wrong_option(&c)));
    c.submit_pick(Pick::Symbol(target.clone()));
    assert_eq!(
        audio.0.borrow().as_slice(),
        &[
            Heard::Speak(target.clone(), 0.9),
            Heard::Chime(Cue::Bad),
            Heard::Chime(Cue::Good),
        ]
    );

    c.set_speech_rate(1.25).unwrap();
    assert_eq!(c.replay(), Some(target.clone()));
    assert_eq!(audio.0.borrow().last(), Some(&Heard::Speak(target.clone(), 1.25)));

    c.set_tts_on(false);
    c.set_sound_on(false);
    audio.0.borrow_mut().clear();
    assert_eq!(c.replay(), Some(target));
    c.start_round().unwrap();
    c.submit_pick(Pick::Symbol(wrong_option(&c)));
    assert!(audio.0.borrow().is_empty());
}

#[test]
fn sequential_hits_announce_the_next_symbol() {
    let backend = InMemoryStore::new();
    let audio = RecordingAudio::default();
    let mut c = controller(xyz(), &backend).with_audio(Box::new(audio.clone()));
    c.switch_mode(Mode::Sequential).unwrap();
    assert_eq!(
        audio.0.borrow().last(),
        Some(&Heard::Speak(Symbol::from("X"), 0.9))
    );

    c.submit_pick(Pick::Cell(sequence_cell(&c, "X")));
    assert_eq!(
        audio.0.borrow().last(),
        Some(&Heard::Speak(Symbol::from("Y"), 0.9))
    );
    assert_eq!(c.replay(), Some(Symbol::from("Y")));
}

#[test]
fn settings_are_persisted_and_validated() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.set_speech_rate(1.5).unwrap();
    c.set_sound_on(false);

    let err = c.set_speech_rate(3.0).unwrap_err();
    assert!(matches!(err, SessionError::Settings(_)));
    assert!((c.settings().speech_rate() - 1.5).abs() < f32::EPSILON);

    let restarted = controller(letters(), &backend);
    assert!(!restarted.settings().sound_on());
    assert!(restarted.settings().tts_on());
    assert!((restarted.settings().speech_rate() - 1.5).abs() < f32::EPSILON);
}

#[test]
fn reset_clears_the_active_profile_only() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    c.submit_pick(Pick::Symbol(recognition_target(&c)));
    c.switch_profile("柚子").unwrap();
    c.submit_pick(Pick::Symbol(wrong_option(&c)));
    assert!(!c.profile().ledger().is_empty());

    c.reset_profile();
    assert_eq!(c.profile().score(), 0);
    assert_eq!(c.profile().wrong_count(), 0);
    assert!(c.profile().ledger().is_empty());
    assert!(c.review(MistakeKind::RecognitionMiss, 10).is_empty());

    c.switch_profile("西瓜").unwrap();
    assert_eq!(c.profile().score(), 10);
}

#[test]
fn failed_writes_keep_play_going_in_memory() {
    let store = ProfileStore::new(Arc::new(ReadOnlyStore), Roster::default());
    let mut c = SessionController::new(letters(), store).with_seed(3);
    c.start_round().unwrap();
    c.submit_pick(Pick::Symbol(recognition_target(&c)));
    assert!(c.is_storage_degraded());
    assert_eq!(c.profile().score(), 10);

    c.switch_profile("柚子").unwrap();
    c.switch_profile("西瓜").unwrap();
    assert_eq!(c.profile().score(), 10);
}

#[test]
fn small_catalog_cannot_start_recognition() {
    let backend = InMemoryStore::new();
    let mut c = controller(catalog(&["A", "B", "C"], &[]), &backend);
    let err = c.start_round().unwrap_err();
    assert!(matches!(
        err,
        SessionError::Config(GenerateError::TooFewSymbols { available: 3, .. })
    ));
    assert!(c.round().is_none());
    assert_eq!(
        c.submit_pick(Pick::Symbol(Symbol::from("A"))).outcome,
        PickOutcome::Ignored
    );
}

fn abc() -> SymbolCatalog {
    catalog(&["A", "B", "C"], &[])
}

#[test]
fn failed_mode_switch_discards_the_live_round() {
    let backend = InMemoryStore::new();
    let mut c = controller(abc(), &backend);
    c.switch_mode(Mode::SearchAll).unwrap();
    assert!(c.submit_pick(Pick::Cell(search_cell(&c, true))).outcome.is_correct());
    let unfound = search_cell(&c, true);
    let token = c.token();
    assert_eq!(c.profile().score(), 5);

    let err = c.switch_mode(Mode::Recognition).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Config(GenerateError::TooFewSymbols { available: 3, .. })
    ));
    assert_eq!(c.mode(), Mode::Recognition);
    assert!(c.round().is_none());
    assert!(c.view().is_none());
    assert_ne!(c.token(), token);

    assert_eq!(c.submit_pick(Pick::Cell(unfound)).outcome, PickOutcome::Ignored);
    assert_eq!(c.profile().score(), 5);
    assert!(!c.fire_advance(token).unwrap());
}

#[test]
fn failed_profile_switch_leaves_nothing_to_score() {
    let backend = InMemoryStore::new();
    let mut c = controller(abc(), &backend);
    c.switch_mode(Mode::SearchAll).unwrap();
    c.submit_pick(Pick::Cell(search_cell(&c, true)));
    let unfound = search_cell(&c, true);
    assert!(c.switch_mode(Mode::Recognition).is_err());

    let err = c.switch_profile("柚子").unwrap_err();
    assert!(matches!(err, SessionError::Config(_)));
    assert_eq!(c.profile().id(), &ProfileId::new("柚子"));
    assert!(c.round().is_none());

    assert_eq!(c.submit_pick(Pick::Cell(unfound)).outcome, PickOutcome::Ignored);
    assert_eq!(c.profile().score(), 0);
    assert!(backend.get(&profile_key(&ProfileId::new("柚子"))).unwrap().is_none());

    let stored = ProfileStore::new(Arc::new(backend.clone()), Roster::default());
    assert_eq!(stored.get(&ProfileId::new("西瓜")).score, 5);
    assert_eq!(stored.active_profile(), ProfileId::new("柚子"));
}

#[test]
fn failed_practice_start_restores_the_previous_mode() {
    let backend = InMemoryStore::new();
    let mut seeded = ProfileSnapshot::default();
    seeded.wrongbook.bump(MistakeKind::RecognitionMiss, "A", 2);
    ProfileStore::new(Arc::new(backend.clone()), Roster::default())
        .put(&ProfileId::new("西瓜"), &seeded);

    let mut c = controller(abc(), &backend);
    c.switch_mode(Mode::SearchAll).unwrap();
    let token = c.token();

    let err = c.start_practice(PracticeKind::Recognition).unwrap_err();
    assert!(matches!(err, SessionError::Config(_)));
    assert!(c.practice().is_none());
    assert_eq!(c.mode(), Mode::SearchAll);
    assert!(c.round().is_none());
    assert_ne!(c.token(), token);
    assert_eq!(count(&c, MistakeKind::RecognitionMiss, "A"), 2);

    c.start_round().unwrap();
    assert!(matches!(c.round(), Some(Round::SearchAll(_))));
    assert!(!c.round().unwrap().is_practice());
}

#[test]
fn mismatched_pick_shapes_are_ignored() {
    let backend = InMemoryStore::new();
    let mut c = controller(letters(), &backend);
    c.start_round().unwrap();
    let report = c.submit_pick(Pick::Cell(CellId::new(0)));
    assert_eq!(report.outcome, PickOutcome::Ignored);
    assert!(report.advance.is_none());
    assert!(backend.get(&profile_key(&ProfileId::new("西瓜"))).unwrap().is_none());
}

#[test]
fn presented_view_serializes_with_a_mode_tag() {
    let backend = InMemoryStore::new();
    let presenter = RecordingPresenter::default();
    let mut c = controller(letters(), &backend).with_presenter(Box::new(presenter.clone()));
    c.switch_mode(Mode::SearchAll).unwrap();

    let view = presenter.views.borrow().last().cloned().unwrap();
    assert_eq!(Some(&view), c.view().as_ref());
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["profile"], "西瓜");
    assert_eq!(json["round"]["mode"], "search-all");
    assert_eq!(json["round"]["cells"].as_array().unwrap().len(), 42);
    assert!(json["round"]["requiredCount"].as_u64().unwrap() >= 5);
    assert!(json["practice"].is_null());
}
