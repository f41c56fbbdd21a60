use super::{Direction, cancel_on_interrupt, index_of, require_login};
use academy_application::{AdminConsole, QuizBuilder};
use academy_core::quiz::QuestionForm;
use anyhow::{Result, bail};
use clap::Subcommand;
use colored::Colorize;

#[derive(Subcommand)]
pub enum QuizCommand {
    /// Show the questions of a video
    List { video_id: u64 },
    /// Append a question and save the quiz
    Add {
        video_id: u64,
        #[arg(long)]
        question: String,
        /// Answer option; repeat for each one
        #[arg(long = "option", value_name = "TEXT", required = true)]
        options: Vec<String>,
        /// Position of the correct option, starting at 1
        #[arg(long, default_value_t = 1)]
        correct: usize,
    },
    /// Change a question and save the quiz
    Edit {
        video_id: u64,
        /// Question number, starting at 1
        number: usize,
        #[arg(long)]
        question: Option<String>,
        /// Replaces every option when given
        #[arg(long = "option", value_name = "TEXT")]
        options: Vec<String>,
        #[arg(long)]
        correct: Option<usize>,
    },
    /// Delete a question
    Delete { video_id: u64, number: usize },
    /// Move a question one place and save the order
    Move {
        video_id: u64,
        number: usize,
        #[arg(value_enum)]
        direction: Direction,
    },
}

pub async fn run(console: &AdminConsole, command: QuizCommand) -> Result<()> {
    require_login(console)?;
    match command {
        QuizCommand::List { video_id } => {
            let builder = load(console, video_id).await?;
            if let Some(video) = &builder.video {
                println!("{}", video.title.bold());
            }
            if builder.questions.is_empty() {
                println!("{}", "No questions yet".bright_black());
            }
            for (i, question) in builder.questions.iter().enumerate() {
                print_question(i + 1, question);
            }
        }
        QuizCommand::Add {
            video_id,
            question,
            options,
            correct,
        } => {
            let mut builder = load(console, video_id).await?;
            let index = builder.add_question();
            builder.questions[index].options = options;
            builder.set_question_text(index, question)?;
            builder.set_correct_option(index, index_of(correct)?)?;
            save(&mut builder).await?;
        }
        QuizCommand::Edit {
            video_id,
            number,
            question,
            options,
            correct,
        } => {
            let mut builder = load(console, video_id).await?;
            let index = index_of(number)?;
            if index >= builder.questions.len() {
                bail!("Question {number} does not exist");
            }
            if !options.is_empty() {
                builder.questions[index].options = options;
            }
            if let Some(text) = question {
                builder.set_question_text(index, text)?;
            }
            if let Some(correct) = correct {
                builder.set_correct_option(index, index_of(correct)?)?;
            }
            builder.questions[index].is_draft = true;
            save(&mut builder).await?;
        }
        QuizCommand::Delete { video_id, number } => {
            let mut builder = load(console, video_id).await?;
            builder.delete_question(index_of(number)?).await?;
            println!("{}", format!("Deleted question {number}").green());
        }
        QuizCommand::Move {
            video_id,
            number,
            direction,
        } => {
            let mut builder = load(console, video_id).await?;
            if !builder.move_question(index_of(number)?, direction.into()) {
                println!("{}", "Nothing to move".bright_black());
                return Ok(());
            }
            builder.save_order().await?;
            for (i, question) in builder.questions.iter().enumerate() {
                print_question(i + 1, question);
            }
        }
    }
    Ok(())
}

async fn load(console: &AdminConsole, video_id: u64) -> Result<QuizBuilder> {
    let mut builder = console.quiz_builder(video_id);
    cancel_on_interrupt(builder.scope_handle());
    builder.load().await?;
    Ok(builder)
}

async fn save(builder: &mut QuizBuilder) -> Result<()> {
    builder.save().await?;
    println!(
        "{}",
        format!("Saved {} question(s)", builder.questions.len()).green()
    );
    Ok(())
}

fn print_question(number: usize, question: &QuestionForm) {
    println!("{}", format!("{number}. {}", question.question_text).bold());
    for (i, option) in question.options.iter().enumerate() {
        if i == question.correct_option_index {
            println!("   {} {}", "*".green(), option.green());
        } else {
            println!("   - {option}");
        }
    }
}
