//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use exam_model::{AnswerLabel, PartOrdinal, TestId, TestKind};

#[derive(Parser)]
#[command(
    name = "exam",
    version,
    about = "Author and validate listening and reading tests",
    long_about = "Author listening and reading tests part by part.\n\n\
                  Every save re-validates the test: structural problems always block,\n\
                  advisory mismatches block only with --strict."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the stored tests.
    #[arg(
        long = "store",
        env = "EXAM_STORE_DIR",
        value_name = "DIR",
        default_value = "exam-store",
        global = true
    )]
    pub store: PathBuf,

    /// Block saves on advisory issues too (declared counts, empty groups).
    #[arg(long = "strict", global = true, conflicts_with = "allow_advisory")]
    pub strict: bool,

    /// Allow saves with advisory issues (the default).
    #[arg(long = "allow-advisory", global = true)]
    pub allow_advisory: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include question and option text in logs.
    #[arg(long = "log-content", global = true)]
    pub log_content: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty test.
    Create(CreateArgs),

    /// List stored tests, most recently updated first.
    List,

    /// Show the parts and question counts of a test.
    Show(TestArg),

    /// Validate a stored test and list its issues.
    Validate(TestArg),

    /// Replace the parts of a test with those of a CSV question sheet.
    Import(ImportArgs),

    /// Write a test as a CSV question sheet.
    Export(ExportArgs),

    /// Write the CSV question sheet template.
    Template(OutputArg),

    /// Delete a test.
    Delete(TestArg),

    /// Show the part shape policy and the validation checks.
    Policy,

    /// Change title, kind, duration or declared counts.
    SetMetadata(SetMetadataArgs),

    /// Append the next part, or every missing part through --through.
    AddPart(AddPartArgs),

    /// Rename a part.
    RenamePart(RenamePartArgs),

    /// Remove the last part.
    RemoveLastPart(TestArg),

    /// Append a blank question to a flat part.
    AddQuestion(PartArgs),

    /// Append an empty group to a grouped part.
    AddGroup(PartArgs),

    /// Append a blank question to a group.
    AddGroupQuestion(GroupArgs),

    /// Edit a question's text, options, answer or explanation.
    UpdateQuestion(UpdateQuestionArgs),

    /// Edit a group's shared audio, images, passage, transcript or translation.
    UpdateGroup(UpdateGroupArgs),

    /// Remove a question from a flat part, or from a group with --group.
    RemoveQuestion(QuestionArgs),

    /// Remove a group and its questions.
    RemoveGroup(IndexedGroupArgs),

    /// Renumber every question from 1.
    Renumber(TestArg),
}

#[derive(Args)]
pub struct TestArg {
    /// Test id.
    #[arg(value_name = "TEST_ID")]
    pub id: TestId,
}

#[derive(Args)]
pub struct CreateArgs {
    /// Test title.
    #[arg(long = "title")]
    pub title: String,

    /// Duration in minutes.
    #[arg(long = "duration", default_value_t = 120)]
    pub duration: u32,

    /// Test kind (full, listening, reading, practice).
    #[arg(long = "kind")]
    pub kind: Option<TestKind>,
}

#[derive(Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub test: TestArg,

    /// CSV question sheet to read.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub test: TestArg,

    #[command(flatten)]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct OutputArg {
    /// Output file (default: stdout).
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct SetMetadataArgs {
    #[command(flatten)]
    pub test: TestArg,

    #[arg(long = "title")]
    pub title: Option<String>,

    #[arg(long = "kind")]
    pub kind: Option<TestKind>,

    #[arg(long = "duration")]
    pub duration: Option<u32>,

    #[arg(long = "declared-questions")]
    pub declared_questions: Option<u32>,

    #[arg(long = "declared-parts")]
    pub declared_parts: Option<u32>,
}

#[derive(Args)]
pub struct AddPartArgs {
    #[command(flatten)]
    pub test: TestArg,

    /// Add every missing part up to and including this one.
    #[arg(long = "through", value_parser = parse_part)]
    pub through: Option<PartOrdinal>,
}

#[derive(Args)]
pub struct RenamePartArgs {
    #[command(flatten)]
    pub part: PartArgs,

    #[arg(long = "name")]
    pub name: String,
}

#[derive(Args)]
pub struct PartArgs {
    #[command(flatten)]
    pub test: TestArg,

    /// Part number (1-7).
    #[arg(long = "part", value_parser = parse_part)]
    pub part: PartOrdinal,
}

#[derive(Args)]
pub struct GroupArgs {
    #[command(flatten)]
    pub part: PartArgs,

    /// Group position within the part, from 0.
    #[arg(long = "group")]
    pub group: usize,
}

#[derive(Args)]
pub struct IndexedGroupArgs {
    #[command(flatten)]
    pub part: PartArgs,

    /// Group position within the part, from 0.
    #[arg(long = "index")]
    pub index: usize,
}

#[derive(Args)]
pub struct QuestionArgs {
    #[command(flatten)]
    pub part: PartArgs,

    /// Group position within the part, for grouped parts.
    #[arg(long = "group")]
    pub group: Option<usize>,

    /// Question position within the part or group, from 0.
    #[arg(long = "index")]
    pub index: usize,
}

#[derive(Args)]
pub struct UpdateQuestionArgs {
    #[command(flatten)]
    pub question: QuestionArgs,

    #[arg(long = "text")]
    pub text: Option<String>,

    /// Option text as LABEL=TEXT, repeatable.
    #[arg(long = "option", value_name = "LABEL=TEXT", value_parser = parse_option)]
    pub options: Vec<(AnswerLabel, String)>,

    #[arg(long = "answer")]
    pub answer: Option<AnswerLabel>,

    #[arg(long = "explanation")]
    pub explanation: Option<String>,
}

#[derive(Args)]
pub struct UpdateGroupArgs {
    #[command(flatten)]
    pub group: IndexedGroupArgs,

    #[arg(long = "audio-url")]
    pub audio_url: Option<String>,

    /// Image URL, repeatable. Replaces the existing list.
    #[arg(long = "image-url")]
    pub image_urls: Vec<String>,

    #[arg(long = "passage-html")]
    pub passage_html: Option<String>,

    #[arg(long = "transcript")]
    pub transcript: Option<String>,

    #[arg(long = "translation")]
    pub translation: Option<String>,
}

fn parse_part(value: &str) -> Result<PartOrdinal, String> {
    let number: u32 = value
        .trim()
        .parse()
        .map_err(|_| format!("{value:?} is not a part number"))?;
    PartOrdinal::new(number).map_err(|e| e.to_string())
}

fn parse_option(value: &str) -> Result<(AnswerLabel, String), String> {
    let (label, text) = value
        .split_once('=')
        .ok_or_else(|| format!("expected LABEL=TEXT, got {value:?}"))?;
    let label = label.parse::<AnswerLabel>().map_err(|e| e.to_string())?;
    Ok((label, text.to_string()))
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
