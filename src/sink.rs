use crate::error::AppError;
use crate::git::Vcs;

/// Hand the final message to git. No retries.
pub fn commit(vcs: &dyn Vcs, message: &str) -> Result<(), AppError> {
    println!("Committing Message... 🚀 ");
    vcs.commit(message)
        .map_err(|e| AppError::Commit(AppError::chain(&e)))?;
    println!("Commit Successful! 🎉");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeVcs;

    #[test]
    fn message_is_passed_through_byte_for_byte() {
        let vcs = FakeVcs::on_branch("main");
        let message = "feat: add x\n\n- first\r\n- second\n";
        commit(&vcs, message).unwrap();
        assert_eq!(vcs.commits(), vec![message.to_string()]);
    }

    #[test]
    fn failure_is_a_commit_error() {
        let vcs = FakeVcs::on_branch("main").failing_commit();
        let err = commit(&vcs, "feat: x").unwrap_err();
        assert!(matches!(err, AppError::Commit(msg) if msg.contains("nothing added")));
    }
}
