//! Command handlers.
//!
//! Every handler works against any [`TestStore`]; `main` passes a
//! [`exam_persistence::FileStore`].

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::{debug, info, trace};

use exam_core::{Edit, EditSession, GroupPatch, MetadataPatch, QuestionPatch, SessionError};
use exam_model::{TestId, TestSummary};
use exam_persistence::{PersistenceError, StoredTest, TestStore};
use exam_validate::validate;

use crate::cli::{
    AddPartArgs, Command, CreateArgs, ExportArgs, ImportArgs, OutputArg, QuestionArgs,
    SetMetadataArgs, UpdateGroupArgs, UpdateQuestionArgs,
};
use crate::logging::redact_content;
use crate::summary::{
    check_table, issue_table, listing_table, policy_table, print_report, print_test,
    row_error_table,
};

/// Run one command. Returns the process exit code.
pub fn run<S: TestStore + ?Sized>(store: &S, command: &Command) -> Result<i32> {
    match command {
        Command::Create(args) => {
            let stored = run_create(store, args)?;
            println!("Created test {}", stored.id);
        }
        Command::List => {
            let listings = store.list_tests().context("list tests")?;
            if listings.is_empty() {
                println!("No tests stored.");
            } else {
                println!("{}", listing_table(&listings));
            }
        }
        Command::Show(arg) => {
            let stored = load(store, arg.id)?;
            print_test(stored.id, &TestSummary::from_test(&stored.test));
        }
        Command::Validate(arg) => {
            let stored = load(store, arg.id)?;
            let report = validate(&stored.test);
            print_report(&report);
            return Ok(i32::from(report.has_errors()));
        }
        Command::Import(args) => {
            let stored = run_import(store, args)?;
            print_test(stored.id, &TestSummary::from_test(&stored.test));
        }
        Command::Export(args) => run_export(store, args)?,
        Command::Template(output) => write_output(output, &store.download_template())?,
        Command::Delete(arg) => {
            store
                .delete_test(arg.id)
                .map_err(|e| explain(e, "delete test"))?;
            println!("Deleted test {}", arg.id);
        }
        Command::Policy => {
            println!("{}", policy_table());
            println!("{}", check_table());
        }
        edit_command => {
            let (id, edits) = edits_for(edit_command)?;
            let stored = edit_and_save(store, id, &edits)?;
            print_test(stored.id, &TestSummary::from_test(&stored.test));
        }
    }
    Ok(0)
}

pub fn run_create<S: TestStore + ?Sized>(store: &S, args: &CreateArgs) -> Result<StoredTest> {
    let stored = store
        .create_test(&args.title, args.duration)
        .map_err(|e| explain(e, "create test"))?;
    match args.kind {
        Some(kind) => edit_and_save(
            store,
            stored.id,
            &[Edit::UpdateMetadata(MetadataPatch {
                kind: Some(kind),
                ..MetadataPatch::default()
            })],
        ),
        None => Ok(stored),
    }
}

pub fn run_import<S: TestStore + ?Sized>(store: &S, args: &ImportArgs) -> Result<StoredTest> {
    let bytes = fs::read(&args.input)
        .with_context(|| format!("read {}", args.input.display()))?;
    let stored = store
        .import_questions(args.test.id, &bytes)
        .map_err(|e| explain(e, "import questions"))?;
    info!(id = %stored.id, parts = stored.test.parts.len(), "imported question sheet");
    Ok(stored)
}

fn run_export<S: TestStore + ?Sized>(store: &S, args: &ExportArgs) -> Result<()> {
    let bytes = store
        .export_test(args.test.id)
        .map_err(|e| explain(e, "export test"))?;
    write_output(&args.output, &bytes)
}

/// Open a session, apply `edits` in order, then save once.
pub fn edit_and_save<S: TestStore + ?Sized>(
    store: &S,
    id: TestId,
    edits: &[Edit],
) -> Result<StoredTest> {
    let mut session = EditSession::open(store, id).map_err(|e| explain_session(e, "open test"))?;
    for edit in edits {
        session
            .apply(edit)
            .map_err(|e| explain_session(e, edit.name()))?;
    }
    debug!(id = %id, edits = session.pending_edits(), "saving edits");
    session.save(store).map_err(|e| explain_session(e, "save test"))
}

/// The edits a structural command stands for.
pub fn edits_for(command: &Command) -> Result<(TestId, Vec<Edit>)> {
    let resolved = match command {
        Command::SetMetadata(args) => (args.test.id, vec![metadata_edit(args)?]),
        Command::AddPart(AddPartArgs { test, through }) => {
            let edit = match through {
                Some(ordinal) => Edit::EnsurePartsThrough(*ordinal),
                None => Edit::AddPart,
            };
            (test.id, vec![edit])
        }
        Command::RenamePart(args) => (
            args.part.test.id,
            vec![Edit::RenamePart {
                part: args.part.part,
                name: args.name.clone(),
            }],
        ),
        Command::RemoveLastPart(arg) => (arg.id, vec![Edit::RemoveLastPart]),
        Command::AddQuestion(args) => (args.test.id, vec![Edit::AddQuestion { part: args.part }]),
        Command::AddGroup(args) => (args.test.id, vec![Edit::AddGroup { part: args.part }]),
        Command::AddGroupQuestion(args) => (
            args.part.test.id,
            vec![Edit::AddQuestionToGroup {
                part: args.part.part,
                group: args.group,
            }],
        ),
        Command::UpdateQuestion(args) => (args.question.part.test.id, vec![question_edit(args)]),
        Command::UpdateGroup(args) => (args.group.part.test.id, vec![group_edit(args)]),
        Command::RemoveQuestion(args) => (args.part.test.id, vec![remove_question_edit(args)]),
        Command::RemoveGroup(args) => (
            args.part.test.id,
            vec![Edit::RemoveGroup {
                part: args.part.part,
                index: args.index,
            }],
        ),
        Command::Renumber(arg) => (arg.id, vec![Edit::RenumberAll]),
        _ => bail!("not an edit command"),
    };
    Ok(resolved)
}

fn metadata_edit(args: &SetMetadataArgs) -> Result<Edit> {
    let patch = MetadataPatch {
        title: args.title.clone(),
        kind: args.kind,
        duration_minutes: args.duration,
        declared_question_count: args.declared_questions,
        declared_part_count: args.declared_parts,
    };
    if patch.is_empty() {
        bail!("nothing to change: pass at least one metadata option");
    }
    Ok(Edit::UpdateMetadata(patch))
}

fn question_edit(args: &UpdateQuestionArgs) -> Edit {
    let mut patch = QuestionPatch::default();
    if let Some(text) = &args.text {
        trace!(text = redact_content(text), "question text");
        patch = patch.with_text(text.clone());
    }
    for (label, text) in &args.options {
        trace!(%label, text = redact_content(text), "option text");
        patch = patch.with_option(*label, text.clone());
    }
    if let Some(answer) = args.answer {
        patch = patch.with_correct_answer(answer);
    }
    if let Some(explanation) = &args.explanation {
        patch = patch.with_explanation(explanation.clone());
    }

    let QuestionArgs { part, group, index } = &args.question;
    match group {
        Some(group) => Edit::UpdateQuestionInGroup {
            part: part.part,
            group: *group,
            index: *index,
            patch,
        },
        None => Edit::UpdateQuestion {
            part: part.part,
            index: *index,
            patch,
        },
    }
}

fn group_edit(args: &UpdateGroupArgs) -> Edit {
    if let Some(transcript) = &args.transcript {
        trace!(transcript = redact_content(transcript), "group transcript");
    }
    let patch = GroupPatch {
        audio_url: args.audio_url.clone().map(Some),
        image_urls: (!args.image_urls.is_empty()).then(|| args.image_urls.clone()),
        passage_html: args.passage_html.clone().map(Some),
        transcript: args.transcript.clone().map(Some),
        translation: args.translation.clone().map(Some),
    };
    Edit::UpdateGroup {
        part: args.group.part.part,
        index: args.group.index,
        patch,
    }
}

fn remove_question_edit(args: &QuestionArgs) -> Edit {
    match args.group {
        Some(group) => Edit::RemoveQuestionFromGroup {
            part: args.part.part,
            group,
            index: args.index,
        },
        None => Edit::RemoveQuestion {
            part: args.part.part,
            index: args.index,
        },
    }
}

fn load<S: TestStore + ?Sized>(store: &S, id: TestId) -> Result<StoredTest> {
    store.load_test(id).map_err(|e| explain(e, "load test"))
}

fn write_output(output: &OutputArg, bytes: &[u8]) -> Result<()> {
    match &output.path {
        Some(path) => write_file(path, bytes),
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(bytes).context("write to stdout")?;
            stdout.flush().context("flush stdout")
        }
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Print the details behind a store failure, then wrap it for the caller.
fn explain(error: PersistenceError, action: &str) -> anyhow::Error {
    match &error {
        PersistenceError::ValidationRejected { issues, .. } => {
            eprintln!("{}", issue_table(issues));
        }
        PersistenceError::Import(import) if !import.row_errors().is_empty() => {
            eprintln!("{}", row_error_table(import.row_errors()));
        }
        _ => {}
    }
    let message = error.user_message();
    if let Some(suggestion) = error.suggestion() {
        eprintln!("hint: {suggestion}");
    }
    anyhow::Error::new(error).context(format!("{action}: {message}"))
}

fn explain_session(error: SessionError, action: &str) -> anyhow::Error {
    match error {
        SessionError::Persistence(error) => explain(error, action),
        SessionError::Blocked { issues } => {
            eprintln!("{}", issue_table(&issues));
            debug!(issues = issues.len(), "save blocked");
            anyhow::anyhow!(
                "{action}: {} issue(s) block saving; the stored test was not changed",
                issues.len()
            )
        }
        SessionError::Edit(error) => anyhow::Error::new(error).context(action.to_string()),
    }
}
