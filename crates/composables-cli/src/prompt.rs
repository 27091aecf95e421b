//! Interactive questions asked by `init` and `target`.
//!
//! Commands talk to a [`Prompter`]; the dialoguer implementation is only
//! compiled with the `interactive` feature.  [`DefaultsPrompter`] answers
//! every question with its default and is used for `--yes`, for builds
//! without the feature, and when stdout is not a terminal.

use composables_core::domain::{Platform, TargetSet};

use crate::error::CliResult;

/// Returns an error message when the answer is not acceptable.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

pub trait Prompter {
    /// Free text, re-asked until `validate` accepts it.
    fn input(&self, prompt: &str, default: &str, validate: Validator<'_>) -> CliResult<String>;

    /// Pick one or more platforms; an empty selection is re-asked.
    fn targets(&self, prompt: &str, defaults: &TargetSet) -> CliResult<TargetSet>;

    fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool>;

    /// Index of the chosen item.
    fn select(&self, prompt: &str, items: &[String]) -> CliResult<usize>;
}

/// Pick the prompter for this invocation.
pub fn prompter(assume_yes: bool) -> Box<dyn Prompter> {
    #[cfg(feature = "interactive")]
    {
        if !assume_yes && console::user_attended() {
            return Box::new(DialoguerPrompter::new());
        }
    }
    #[cfg(not(feature = "interactive"))]
    let _ = assume_yes;

    Box::new(DefaultsPrompter)
}

// ── Defaults ──────────────────────────────────────────────────────────────────

/// Answers every question with its default; confirmations are accepted.
pub struct DefaultsPrompter;

impl Prompter for DefaultsPrompter {
    fn input(&self, _prompt: &str, default: &str, _validate: Validator<'_>) -> CliResult<String> {
        Ok(default.to_string())
    }

    fn targets(&self, _prompt: &str, defaults: &TargetSet) -> CliResult<TargetSet> {
        Ok(defaults.clone())
    }

    fn confirm(&self, _prompt: &str, _default: bool) -> CliResult<bool> {
        Ok(true)
    }

    fn select(&self, _prompt: &str, _items: &[String]) -> CliResult<usize> {
        Ok(0)
    }
}

// ── Dialoguer ─────────────────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
pub use interactive::DialoguerPrompter;

#[cfg(feature = "interactive")]
mod interactive {
    use std::io;

    use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};

    use super::{Platform, Prompter, TargetSet, Validator};
    use crate::error::{CliResult, IntoCli};

    pub struct DialoguerPrompter {
        theme: ColorfulTheme,
    }

    impl DialoguerPrompter {
        pub fn new() -> Self {
            Self {
                theme: ColorfulTheme::default(),
            }
        }
    }

    impl Prompter for DialoguerPrompter {
        fn input(&self, prompt: &str, default: &str, validate: Validator<'_>) -> CliResult<String> {
            Input::<String>::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default.to_string())
                .validate_with(|value: &String| validate(value.trim()))
                .interact_text()
                .map(|value| value.trim().to_string())
                .map_err(io::Error::from)
                .with_cli_context(|| format!("reading '{prompt}'"))
        }

        fn targets(&self, prompt: &str, defaults: &TargetSet) -> CliResult<TargetSet> {
            let labels: Vec<&str> = Platform::ALL.iter().map(|p| p.label()).collect();
            let checked: Vec<bool> = Platform::ALL.iter().map(|p| defaults.contains(*p)).collect();

            loop {
                let chosen = MultiSelect::with_theme(&self.theme)
                    .with_prompt(format!("{prompt} (space to toggle, enter to confirm)"))
                    .items(&labels)
                    .defaults(&checked)
                    .interact()
                    .map_err(io::Error::from)
                    .with_cli_context(|| "reading target selection")?;

                match TargetSet::new(chosen.into_iter().map(|i| Platform::ALL[i])) {
                    Ok(targets) => return Ok(targets),
                    Err(_) => {
                        console::Term::stderr()
                            .write_line("Select at least one target.")
                            .with_cli_context(|| "writing prompt")?;
                    }
                }
            }
        }

        fn confirm(&self, prompt: &str, default: bool) -> CliResult<bool> {
            Confirm::with_theme(&self.theme)
                .with_prompt(prompt)
                .default(default)
                .interact()
                .map_err(io::Error::from)
                .with_cli_context(|| format!("reading '{prompt}'"))
        }

        fn select(&self, prompt: &str, items: &[String]) -> CliResult<usize> {
            Select::with_theme(&self.theme)
                .with_prompt(prompt)
                .items(items)
                .default(0)
                .interact()
                .map_err(io::Error::from)
                .with_cli_context(|| format!("reading '{prompt}'"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prompter_returns_defaults() {
        let p = DefaultsPrompter;
        let reject_all = |_: &str| Err("never valid".to_string());

        assert_eq!(p.input("Name", "My App", &reject_all).unwrap(), "My App");
        assert_eq!(
            p.targets("Targets", &TargetSet::single(Platform::Web)).unwrap(),
            TargetSet::single(Platform::Web)
        );
        assert!(p.confirm("Continue?", false).unwrap());
        assert_eq!(p.select("Module", &["a".into(), "b".into()]).unwrap(), 0);
    }

    #[test]
    fn assume_yes_never_prompts() {
        let p = prompter(true);
        assert!(p.confirm("Continue?", false).unwrap());
    }
}
