use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use registration::RegistrationModule;
use registration::api::{FormView, StatusView};
use registration::config::RegistrationConfig;
use registration::domain::session::RegistrationSession;
use registration_sdk::{FieldId, RegistrationInput, SubmissionStatus};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::render;

/// Exit code when the form is invalid or the user aborted.
pub const EXIT_INVALID: u8 = 2;

/// The five form values given as flags.
#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub email: String,
    #[arg(long, default_value = "")]
    pub password: String,
    #[arg(long, default_value = "")]
    pub password_confirmation: String,
    #[arg(long, default_value = "")]
    pub access_code: String,
}

impl From<FormArgs> for RegistrationInput {
    fn from(args: FormArgs) -> Self {
        Self {
            name: args.name,
            email: args.email,
            password: args.password,
            password_confirmation: args.password_confirmation,
            access_code: args.access_code,
        }
    }
}

/// How an interactive fill ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillOutcome {
    Submitted(SubmissionStatus),
    Aborted,
}

impl FillOutcome {
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FillOutcome::Submitted(status) => status_exit_code(status),
            FillOutcome::Aborted => ExitCode::from(EXIT_INVALID),
        }
    }
}

fn status_exit_code(status: &SubmissionStatus) -> ExitCode {
    if status.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Interactive form: prompt every field, re-prompt invalid ones, confirm, submit once.
///
/// # Errors
/// Fails on I/O errors. End of input aborts without submitting.
pub async fn fill<R, W>(
    session: &mut RegistrationSession,
    input: R,
    out: &mut W,
) -> Result<FillOutcome>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    for id in FieldId::ALL {
        if !prompt_field(session, id, &mut lines, out).await? {
            return Ok(FillOutcome::Aborted);
        }
    }

    loop {
        writeln!(out, "\n{}\n", render::Page(&FormView::from(&*session)))?;
        if session.can_submit() {
            break;
        }
        let invalid: Vec<FieldId> = session
            .form()
            .fields()
            .filter(|f| !f.is_valid())
            .map(|f| f.id())
            .collect();
        for id in invalid {
            if !prompt_field(session, id, &mut lines, out).await? {
                return Ok(FillOutcome::Aborted);
            }
        }
    }

    write!(out, "Register? [y/N]: ")?;
    out.flush()?;
    let answer = lines.next_line().await?.unwrap_or_default();
    if !matches!(answer.trim(), "y" | "Y" | "yes") {
        writeln!(out, "Not submitted.")?;
        return Ok(FillOutcome::Aborted);
    }

    let status = session.submit().await?.clone();
    writeln!(out, "{}", render::Status(&StatusView::from(&status)))?;
    Ok(FillOutcome::Submitted(status))
}

/// Returns `false` on end of input.
async fn prompt_field<R, W>(
    session: &mut RegistrationSession,
    id: FieldId,
    lines: &mut tokio::io::Lines<R>,
    out: &mut W,
) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{} ({}): ", id.label(), id.placeholder())?;
    out.flush()?;

    let Some(line) = lines.next_line().await? else {
        writeln!(out)?;
        return Ok(false);
    };
    session.set(id, line);

    if let Some(message) = session.form().field(id).and_then(|f| f.error_message()) {
        writeln!(out, "    ! {message}")?;
    }
    Ok(true)
}

/// Write every violation of every invalid field; returns whether the form is valid.
fn report_violations<W: Write>(session: &RegistrationSession, out: &mut W) -> Result<bool> {
    let mut valid = true;
    for field in session.form().fields() {
        for violation in field.violations() {
            valid = false;
            writeln!(out, "{}: {violation}", field.id().label())?;
        }
    }
    Ok(valid)
}

fn session_with(module: &RegistrationModule, args: FormArgs) -> RegistrationSession {
    let mut session = module.session();
    let input = RegistrationInput::from(args);
    for id in FieldId::ALL {
        session.set(id, input.get(id));
    }
    session
}

/// Non-interactive submission from flags.
///
/// # Errors
/// Fails on I/O errors.
pub async fn submit<W: Write>(
    module: &RegistrationModule,
    args: FormArgs,
    out: &mut W,
) -> Result<ExitCode> {
    let mut session = session_with(module, args);
    if !report_violations(&session, out)? {
        return Ok(ExitCode::from(EXIT_INVALID));
    }

    let status = session.submit().await?.clone();
    writeln!(out, "{}", render::Status(&StatusView::from(&status)))?;
    Ok(status_exit_code(&status))
}

/// Validate flags without submitting.
///
/// # Errors
/// Fails on I/O or serialization errors.
pub fn validate<W: Write>(
    module: &RegistrationModule,
    args: FormArgs,
    json: bool,
    out: &mut W,
) -> Result<ExitCode> {
    let session = session_with(module, args);

    let valid = if json {
        let view = FormView::from(&session);
        serde_json::to_writer_pretty(&mut *out, &view).context("failed to render form view")?;
        writeln!(out)?;
        session.form().is_submittable()
    } else {
        let valid = report_violations(&session, out)?;
        if valid {
            writeln!(out, "All fields are valid")?;
        }
        valid
    };

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_INVALID)
    })
}

/// Validate the configuration and build the HTTPS client without sending anything.
///
/// # Errors
/// Fails when the configuration is invalid.
pub fn check<W: Write>(config: &RegistrationConfig, out: &mut W) -> Result<()> {
    tracing::info!("Checking configuration...");
    RegistrationModule::new(config)?;
    writeln!(out, "Configuration is valid")?;
    writeln!(out, "endpoint: {}", config.endpoint()?)?;
    Ok(())
}
