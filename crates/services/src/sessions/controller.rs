use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use storage::ProfileStore;
use zhuyin_core::engine::{self, PickOutcome};
use zhuyin_core::model::{
    CellId, GameSettings, LedgerEntry, MistakeKind, Mode, PracticeKind, PracticeSession, Profile,
    Round, RoundToken, Symbol, SymbolCatalog,
};
use zhuyin_core::{Clock, PracticeSelector, RoundGenerator};

use super::advance::ScheduledAdvance;
use super::view::RoundView;
use crate::error::SessionError;
use crate::ports::{AudioSink, Cue, Headless, Muted, Notice, Presenter};

//
// ─── INPUTS & REPORTS ──────────────────────────────────────────────────────────
//

/// A learner's pick: an option in recognition, a grid cell otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Symbol(Symbol),
    Cell(CellId),
}

/// Result of a pick routed through the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickReport {
    pub outcome: PickOutcome,
    /// Set when the pick completed the round.
    pub advance: Option<ScheduledAdvance>,
}

/// Result of asking for a practice session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PracticeStart {
    /// The session is active and its first round is up.
    Started(RoundView),
    /// The ledger section is empty; nothing changed.
    NothingToPractice(PracticeKind),
}

//
// ─── CONTROLLER ────────────────────────────────────────────────────────────────
//

/// Owns the active profile, mode, round and practice session.
///
/// Every pick is evaluated synchronously against the current round and the
/// profile is persisted before the call returns. Completed rounds schedule a
/// [`ScheduledAdvance`] tagged with the round's token; a switch of mode or
/// profile issues a new token, so an advance scheduled for an older round is
/// ignored.
pub struct SessionController {
    catalog: SymbolCatalog,
    store: ProfileStore,
    profile: Profile,
    settings: GameSettings,
    mode: Mode,
    round: Option<Round>,
    token: RoundToken,
    practice: Option<PracticeSession>,
    pending: Option<ScheduledAdvance>,
    clock: Clock,
    rng: StdRng,
    presenter: Box<dyn Presenter>,
    audio: Box<dyn AudioSink>,
}

impl SessionController {
    /// Load the active profile and settings from `store`. No round is started
    /// until [`SessionController::start_round`] is called.
    #[must_use]
    pub fn new(catalog: SymbolCatalog, store: ProfileStore) -> Self {
        let id = store.active_profile();
        let snapshot = store.get(&id);
        let settings = store.settings();
        debug!(profile = %id, score = snapshot.score, "loaded active profile");
        Self {
            catalog,
            profile: Profile::new(id, snapshot),
            settings,
            store,
            mode: Mode::Recognition,
            round: None,
            token: RoundToken::new(0),
            practice: None,
            pending: None,
            clock: Clock::default(),
            rng: StdRng::from_os_rng(),
            presenter: Box::new(Headless),
            audio: Box::new(Muted),
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Use a deterministic RNG; the same seed reproduces the same rounds.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn with_presenter(mut self, presenter: Box<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    #[must_use]
    pub fn with_audio(mut self, audio: Box<dyn AudioSink>) -> Self {
        self.audio = audio;
        self
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> RoundToken {
        self.token
    }

    #[must_use]
    pub fn practice(&self) -> Option<&PracticeSession> {
        self.practice.as_ref()
    }

    #[must_use]
    pub fn pending_advance(&self) -> Option<ScheduledAdvance> {
        self.pending
    }

    #[must_use]
    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    /// True once a storage write failed and progress is kept in memory only.
    #[must_use]
    pub fn is_storage_degraded(&self) -> bool {
        self.store.is_degraded()
    }

    /// Snapshot of the current round, if one has been started.
    #[must_use]
    pub fn view(&self) -> Option<RoundView> {
        self.round.as_ref().map(|round| {
            RoundView::build(self.token, &self.profile, round, self.practice.as_ref())
        })
    }

    // ─── Rounds ────────────────────────────────────────────────────────────────

    /// Replace the current round with a fresh one for the active mode.
    ///
    /// The previous round is discarded and a new token issued before
    /// generation, so a failure leaves no round to pick against. An active
    /// practice session keeps biasing generation; a recognition queue that has
    /// run dry ends its session here.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the catalog cannot build a round for
    /// the active mode.
    pub fn start_round(&mut self) -> Result<RoundView, SessionError> {
        self.pending = None;
        self.round = None;
        self.token = self.token.next();
        if self
            .practice
            .as_ref()
            .is_some_and(|session| session.mode() != self.mode || session.is_exhausted())
        {
            self.finish_practice();
        }

        let generator = RoundGenerator::new(&self.catalog);
        let round = match self.mode {
            Mode::Recognition => {
                let target = self.practice.as_mut().and_then(PracticeSession::next_target);
                Round::Recognition(generator.recognition(&mut self.rng, target.as_ref())?)
            }
            Mode::SearchAll => {
                let target = self.practice.as_mut().and_then(PracticeSession::next_target);
                Round::SearchAll(generator.search_all(&mut self.rng, target.as_ref())?)
            }
            Mode::Sequential => {
                let sequence = self.practice.as_ref().and_then(PracticeSession::sequence);
                Round::Sequential(generator.sequential(&mut self.rng, sequence)?)
            }
        };

        info!(
            mode = %self.mode,
            token = %self.token,
            practice = round.is_practice(),
            "round started"
        );
        if let Some(symbol) = round.prompt_symbol().cloned() {
            self.speak(&symbol);
        }
        let view = RoundView::build(self.token, &self.profile, &round, self.practice.as_ref());
        self.round = Some(round);
        self.presenter.present(&view);
        Ok(view)
    }

    /// Evaluate a pick against the current round.
    ///
    /// Picks of the wrong shape for the mode, picks on finished rounds and picks
    /// before any round has started are ignored.
    pub fn submit_pick(&mut self, pick: Pick) -> PickReport {
        let snapshot = self.profile.snapshot_mut();
        let outcome = match (self.round.as_mut(), &pick) {
            (Some(Round::Recognition(round)), Pick::Symbol(symbol)) => {
                engine::recognition::submit_pick(round, snapshot, symbol)
            }
            (Some(Round::SearchAll(round)), Pick::Cell(cell)) => {
                engine::search_all::submit_pick(round, snapshot, *cell)
            }
            (Some(Round::Sequential(round)), Pick::Cell(cell)) => {
                engine::sequential::submit_pick(round, snapshot, *cell)
            }
            _ => PickOutcome::Ignored,
        };

        if outcome == PickOutcome::Ignored {
            debug!(?pick, token = %self.token, "pick ignored");
            return PickReport {
                outcome,
                advance: None,
            };
        }

        self.persist_profile();
        self.chime(if outcome.is_correct() { Cue::Good } else { Cue::Bad });

        let mut advance = None;
        match &outcome {
            PickOutcome::Hit { next: Some(next) } => {
                let next = next.clone();
                self.speak(&next);
            }
            PickOutcome::Completed { advance_after } => {
                let scheduled = ScheduledAdvance::new(
                    self.token,
                    *advance_after,
                    self.clock.after(*advance_after),
                );
                info!(
                    mode = %self.mode,
                    token = %self.token,
                    score = self.profile.score(),
                    "round completed"
                );
                self.pending = Some(scheduled);
                advance = Some(scheduled);
                if matches!(
                    &self.practice,
                    Some(session @ PracticeSession::Recognition { .. }) if session.is_exhausted()
                ) {
                    self.finish_practice();
                }
            }
            _ => {}
        }

        self.refresh();
        PickReport { outcome, advance }
    }

    /// Run the advance scheduled for `token`, if it still names the current round.
    ///
    /// Returns `Ok(false)` for a stale or unknown token without touching state.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the next round cannot be generated.
    pub fn fire_advance(&mut self, token: RoundToken) -> Result<bool, SessionError> {
        let current = self
            .pending
            .is_some_and(|pending| pending.token() == token && token == self.token);
        if !current {
            debug!(stale = %token, current = %self.token, "stale advance ignored");
            return Ok(false);
        }
        self.start_round()?;
        Ok(true)
    }

    /// Fire the pending advance if it is due according to the controller's clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the next round cannot be generated.
    pub fn tick(&mut self) -> Result<bool, SessionError> {
        self.tick_at(self.clock.now())
    }

    /// Fire the pending advance if it is due at `now`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the next round cannot be generated.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> Result<bool, SessionError> {
        match self.pending {
            Some(pending) if pending.is_due(now) => self.fire_advance(pending.token()),
            _ => Ok(false),
        }
    }

    /// Ask for the current prompt to be pronounced again.
    ///
    /// Returns the symbol requested, or `None` when there is nothing to say.
    pub fn replay(&mut self) -> Option<Symbol> {
        let symbol = self.round.as_ref()?.prompt_symbol()?.clone();
        self.speak(&symbol);
        Some(symbol)
    }

    // ─── Mode & profile ────────────────────────────────────────────────────────

    /// Switch mode, cancel any practice session and start a new round.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the catalog cannot serve `mode`. The
    /// mode stays switched with no current round.
    pub fn switch_mode(&mut self, mode: Mode) -> Result<RoundView, SessionError> {
        self.cancel_practice("mode switch");
        info!(from = %self.mode, to = %mode, "mode switched");
        self.mode = mode;
        self.start_round()
    }

    /// Persist the current profile, make `name` active and start a new round.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Roster` if `name` is not in the roster, or
    /// `SessionError::Config` if the next round cannot be generated. In the
    /// latter case the new profile stays active with no current round.
    pub fn switch_profile(&mut self, name: &str) -> Result<RoundView, SessionError> {
        let next = self.store.roster().get(name)?.clone();
        self.persist_profile();
        self.store.set_active_profile(&next);

        let snapshot = self.store.get(&next);
        info!(from = %self.profile.id(), to = %next, "profile switched");
        self.profile = Profile::new(next, snapshot);
        self.cancel_practice("profile switch");
        self.start_round()
    }

    /// Zero the active profile's score, wrong count and ledger.
    pub fn reset_profile(&mut self) {
        *self.profile.snapshot_mut() = Default::default();
        self.persist_profile();
        self.cancel_practice("profile reset");
        info!(profile = %self.profile.id(), "profile reset");
        self.refresh();
    }

    // ─── Practice ──────────────────────────────────────────────────────────────

    /// Start a practice session drawn from the active profile's ledger.
    ///
    /// Switches to the kind's mode and starts its first round. An empty ledger
    /// section leaves every piece of state untouched.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Config` if the first practice round cannot be
    /// generated; the session is dropped and the previous mode restored.
    pub fn start_practice(&mut self, kind: PracticeKind) -> Result<PracticeStart, SessionError> {
        let selected =
            PracticeSelector::new(self.profile.ledger(), &self.catalog).start(kind, &mut self.rng);
        let Some(session) = selected else {
            info!(?kind, "nothing to practice");
            self.presenter.notice(Notice::NothingToPractice(kind));
            return Ok(PracticeStart::NothingToPractice(kind));
        };

        info!(?kind, remaining = ?session.remaining(), "practice started");
        let previous = self.mode;
        self.practice = Some(session);
        self.mode = kind.mode();
        match self.start_round() {
            Ok(view) => Ok(PracticeStart::Started(view)),
            Err(err) => {
                self.practice = None;
                self.mode = previous;
                Err(err)
            }
        }
    }

    /// End the practice session. The current round is left as it is.
    pub fn stop_practice(&mut self) -> bool {
        self.cancel_practice("stopped")
    }

    /// The `limit` most frequent entries of one ledger section.
    #[must_use]
    pub fn review(&self, kind: MistakeKind, limit: usize) -> Vec<LedgerEntry> {
        self.profile.ledger().section(kind).top_entries(limit)
    }

    // ─── Settings ──────────────────────────────────────────────────────────────

    pub fn set_sound_on(&mut self, on: bool) {
        self.settings.set_sound_on(on);
        self.store.put_settings(&self.settings);
    }

    pub fn set_tts_on(&mut self, on: bool) {
        self.settings.set_tts_on(on);
        self.store.put_settings(&self.settings);
    }

    /// # Errors
    ///
    /// Returns `SessionError::Settings` if `rate` is outside the accepted range.
    pub fn set_speech_rate(&mut self, rate: f32) -> Result<(), SessionError> {
        self.settings.set_speech_rate(rate)?;
        self.store.put_settings(&self.settings);
        Ok(())
    }

    // ─── Internals ─────────────────────────────────────────────────────────────

    fn persist_profile(&mut self) {
        self.store.put(self.profile.id(), self.profile.snapshot());
    }

    fn cancel_practice(&mut self, reason: &'static str) -> bool {
        match self.practice.take() {
            Some(session) => {
                info!(kind = ?session.kind(), reason, "practice cancelled");
                true
            }
            None => false,
        }
    }

    fn finish_practice(&mut self) {
        if let Some(session) = self.practice.take() {
            let kind = session.kind();
            info!(?kind, "practice finished");
            self.presenter.notice(Notice::PracticeFinished(kind));
        }
    }

    fn speak(&mut self, symbol: &Symbol) {
        if self.settings.tts_on() {
            self.audio.speak(symbol, self.settings.speech_rate());
        }
    }

    fn chime(&mut self, cue: Cue) {
        if self.settings.sound_on() {
            self.audio.chime(cue);
        }
    }

    fn refresh(&mut self) {
        if let Some(view) = self.view() {
            self.presenter.present(&view);
        }
    }
}
