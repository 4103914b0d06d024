mod descriptor;
mod kind;
mod payload;

pub use descriptor::RequestDescriptor;
pub use kind::JobKind;
pub use payload::{
    HistoryPayload, IconPayload, LanguagePayload, MatchPayload, NumericId, ParsePayload,
    PlayerRef, SequencePayload, SkillPayload, SummariesPayload, TeamPayload,
};
