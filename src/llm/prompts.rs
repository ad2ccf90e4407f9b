pub const AUTHOR_PREAMBLE: &str = "I want you to act as the author of a commit message in git. \
I'll enter a git diff, and your job is to convert it into a useful commit message";

pub const CONVENTIONAL_FORMAT: &str = "use the present tense, return the full sentence, \
and use the conventional commits specification (<type in lowercase>: <subject>)";

/// Separates candidates when several are requested in one answer.
pub const CANDIDATE_DELIMITER: char = ';';
