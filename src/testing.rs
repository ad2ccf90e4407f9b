//! Test doubles for the collaborators at the edge of the commit workflow.

use crate::git::Vcs;
use crate::llm::{FragmentStream, LlmClient};
use crate::operator::Operator;
use anyhow::{anyhow, Result};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::sync::Mutex;

pub struct FakeVcs {
    pub repository: bool,
    pub diff: String,
    branch: String,
    fail_branch: bool,
    fail_commit: bool,
    lookups: Cell<usize>,
    commits: RefCell<Vec<String>>,
}

impl FakeVcs {
    pub fn on_branch(branch: &str) -> Self {
        FakeVcs {
            repository: true,
            diff: String::new(),
            branch: branch.to_string(),
            fail_branch: false,
            fail_commit: false,
            lookups: Cell::new(0),
            commits: RefCell::new(Vec::new()),
        }
    }

    pub fn with_diff(diff: &str) -> Self {
        let mut vcs = Self::on_branch("main");
        vcs.diff = diff.to_string();
        vcs
    }

    pub fn failing_branch(mut self) -> Self {
        self.fail_branch = true;
        self
    }

    pub fn failing_commit(mut self) -> Self {
        self.fail_commit = true;
        self
    }

    pub fn branch_lookups(&self) -> usize {
        self.lookups.get()
    }

    pub fn commits(&self) -> Vec<String> {
        self.commits.borrow().clone()
    }
}

impl Vcs for FakeVcs {
    fn is_repository(&self) -> bool {
        self.repository
    }

    fn staged_diff(&self) -> Result<String> {
        Ok(self.diff.clone())
    }

    fn current_branch(&self) -> Result<String> {
        self.lookups.set(self.lookups.get() + 1);
        if self.fail_branch {
            return Err(anyhow!("fatal: not a git repository"));
        }
        Ok(self.branch.clone())
    }

    fn commit(&self, message: &str) -> Result<()> {
        if self.fail_commit {
            return Err(anyhow!("nothing added to commit"));
        }
        self.commits.borrow_mut().push(message.to_string());
        Ok(())
    }
}

/// Model that plays back one scripted answer per call.
#[derive(Default)]
pub struct FakeLlm {
    answers: Mutex<VecDeque<Vec<Result<String, String>>>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn answering(answers: &[&str]) -> Self {
        let llm = FakeLlm::default();
        for answer in answers {
            llm.push(vec![Ok(answer.to_string())]);
        }
        llm
    }

    pub fn push(&self, fragments: Vec<Result<String, String>>) {
        self.answers.lock().unwrap().push_back(fragments);
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LlmClient for FakeLlm {
    fn name(&self) -> &str {
        "fake"
    }

    fn generate(&self, prompt: &str) -> Result<FragmentStream<'_>> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let fragments = self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted answer left"))?;
        Ok(Box::new(
            fragments.into_iter().map(|f| f.map_err(|e| anyhow!(e))),
        ))
    }
}

/// Operator answering from a script; running out of answers is an error.
#[derive(Default)]
pub struct ScriptedOperator {
    confirms: VecDeque<bool>,
    selections: VecDeque<Option<usize>>,
    pub confirm_calls: usize,
    pub select_calls: usize,
    pub menus: Vec<Vec<String>>,
}

impl ScriptedOperator {
    pub fn with_confirms<const N: usize>(answers: [bool; N]) -> Self {
        ScriptedOperator {
            confirms: answers.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_selections<const N: usize>(choices: [Option<usize>; N]) -> Self {
        ScriptedOperator {
            selections: choices.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn prompts(&self) -> usize {
        self.confirm_calls + self.select_calls
    }
}

impl Operator for ScriptedOperator {
    fn confirm(&mut self, question: &str, _default: bool) -> Result<bool> {
        self.confirm_calls += 1;
        self.confirms
            .pop_front()
            .ok_or_else(|| anyhow!("unexpected confirmation: {question}"))
    }

    fn select(&mut self, question: &str, options: &[String]) -> Result<Option<usize>> {
        self.select_calls += 1;
        self.menus.push(options.to_vec());
        self.selections
            .pop_front()
            .ok_or_else(|| anyhow!("unexpected menu: {question}"))
    }
}
