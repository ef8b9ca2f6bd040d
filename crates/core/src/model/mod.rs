mod catalog;
mod ids;
mod ledger;
mod practice;
mod profile;
mod round;
mod settings;
mod symbol;

pub use catalog::{CatalogError, SymbolCatalog};
pub use ids::{CellId, ParseIdError, ProfileId, RoundToken};
pub use ledger::{Ledger, LedgerEntry, MistakeKind, MistakeMap};
pub use practice::{PracticeKind, PracticeSession};
pub use profile::{DEFAULT_ROSTER, Profile, ProfileSnapshot, Roster, RosterError};
pub use round::{
    Mode, RecognitionRound, Round, SearchAllRound, SearchCell, SequenceCell, SequentialRound,
};
pub use settings::{GameSettings, SPEECH_RATE_RANGE, SettingsError};
pub use symbol::{Sequence, SequenceKey, Symbol};
