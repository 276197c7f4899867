mod rank_candidates;

pub use rank_candidates::{parse_candidate_line, RankCandidatesUseCase};
