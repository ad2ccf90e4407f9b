use crate::llm::prompts;

/// Instruction text for one generation attempt, diff included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build the prompt for `diff`.
///
/// `candidate_count` switches to list mode: the model is asked for that many
/// options separated by `;`. Without it the model is asked for exactly one
/// message with no preface. The diff always goes last, verbatim.
pub fn build(
    diff: &str,
    language: &str,
    commit_type: Option<&str>,
    candidate_count: Option<usize>,
) -> Prompt {
    let mut text = String::with_capacity(diff.len() + 512);
    text.push_str(prompts::AUTHOR_PREAMBLE);
    text.push_str(&format!(" in {language} language"));

    if let Some(kind) = commit_type {
        text.push_str(&format!(" with commit type '{kind}'"));
    }

    match candidate_count {
        Some(n) => {
            text.push_str(&format!(
                ", and make exactly {n} options that are separated by \"{delim}\". \
                 For each option, {rules}: ",
                delim = prompts::CANDIDATE_DELIMITER,
                rules = prompts::CONVENTIONAL_FORMAT
            ));
        }
        None => {
            text.push_str(&format!(
                ". Return exactly one commit message. Do not preface the commit with anything, {rules}: ",
                rules = prompts::CONVENTIONAL_FORMAT
            ));
        }
    }

    text.push_str(diff);
    Prompt(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIFF: &str = "diff --git a/a.txt b/a.txt\n+hello\n";

    #[test]
    fn same_inputs_give_the_same_prompt() {
        let a = build(DIFF, "english", Some("fix"), Some(3));
        let b = build(DIFF, "english", Some("fix"), Some(3));
        assert_eq!(a, b);
    }

    #[test]
    fn single_mode_asks_for_one_message() {
        let p = build(DIFF, "english", None, None);
        let s = p.as_str();
        assert!(s.starts_with("I want you to act as the author of a commit message in git."));
        assert!(s.contains("in english language"));
        assert!(s.contains("exactly one commit message"));
        assert!(s.contains("Do not preface"));
        assert!(s.contains("present tense"));
        assert!(s.contains("<type in lowercase>: <subject>"));
        assert!(!s.contains("commit type '"));
        assert!(!s.contains("options"));
    }

    #[test]
    fn list_mode_asks_for_delimited_options() {
        let p = build(DIFF, "german", None, Some(4));
        let s = p.as_str();
        assert!(s.contains("in german language"));
        assert!(s.contains("exactly 4 options that are separated by \";\""));
        assert!(!s.contains("exactly one commit message"));
    }

    #[test]
    fn commit_type_is_pinned() {
        let p = build(DIFF, "english", Some("docs"), None);
        assert!(p.as_str().contains("with commit type 'docs'"));
    }

    #[test]
    fn diff_is_appended_verbatim() {
        let p = build(DIFF, "english", None, Some(2));
        assert!(p.as_str().ends_with(DIFF));
    }
}
