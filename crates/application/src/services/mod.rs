mod candidate_selector;

pub use candidate_selector::select;
