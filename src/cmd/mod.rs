use clap::{Parser, Subcommand};

use crate::conf::settings;
use crate::pkg::internal::adaptors::jobs::mutators::CreateJobInput;
use crate::pkg::internal::adaptors::jobs::selectors::JobSelector;
use crate::pkg::internal::adaptors::jobs::spec::{
    default_profile_fields, JobFormValues, JobStatus, StoredJob,
};
use crate::pkg::ui::apply::ApplyForm;
use crate::pkg::ui::candidates_page::CandidatesPage;
use crate::pkg::ui::dashboard::{AdminDashboard, UserDashboard};
use crate::pkg::ui::state::AppState;
use crate::pkg::ui::table::{CandidatesTable, SUBMITTED_COLUMN_KEY};
use crate::prelude::Result;

#[derive(Parser)]
#[command(about = "local-first job board")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// Manage job postings
    Jobs {
        #[command(subcommand)]
        action: JobsAction,
    },
    /// Browse open postings as an applicant
    Board {
        /// Show one posting in detail
        #[arg(long)]
        job: Option<String>,
    },
    /// List candidates for a job
    Candidates {
        job_id: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Submit an application to a job
    Apply {
        job_id: String,
        /// Field values as key=value pairs
        #[arg(long = "field")]
        fields: Vec<String>,
    },
}

#[derive(Subcommand)]
enum JobsAction {
    /// List postings
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Create a posting
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        job_type: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        candidates_needed: Option<String>,
        #[arg(long)]
        min_salary: Option<String>,
        #[arg(long)]
        max_salary: Option<String>,
        /// Publish immediately instead of saving a draft
        #[arg(long)]
        publish: bool,
    },
    /// Show a posting
    Show { id: String },
    /// Publish a draft
    Publish { id: String },
    /// Delete a posting
    Delete { id: String },
}

pub fn run() -> Result<()> {
    let args = Cmd::parse();
    tracing::debug!("{} starting", settings.service_name);
    let state = AppState::new()?;
    match args.command {
        Some(SubCommandType::Jobs { action }) => jobs(state, action)?,
        Some(SubCommandType::Board { job }) => board(state, job)?,
        Some(SubCommandType::Candidates { job_id, page }) => candidates(state, &job_id, page)?,
        Some(SubCommandType::Apply { job_id, fields }) => apply(state, &job_id, &fields)?,
        None => {
            tracing::error!("no subcommand passed");
        }
    }
    Ok(())
}

fn jobs(state: AppState, action: JobsAction) -> Result<()> {
    match action {
        JobsAction::List { status } => {
            let dashboard = AdminDashboard::new(state);
            match status.as_deref() {
                Some("draft") => print_job_list("DRAFTS", dashboard.drafts()),
                Some("active") => print_job_list("ACTIVE", dashboard.active()),
                Some(other) => anyhow::bail!("unknown status filter: {}", other),
                None => {
                    print_job_list("DRAFTS", dashboard.drafts());
                    print_job_list("ACTIVE", dashboard.active());
                }
            }
        }
        JobsAction::Create {
            name,
            job_type,
            description,
            candidates_needed,
            min_salary,
            max_salary,
            publish,
        } => {
            let mut dashboard = AdminDashboard::new(state);
            let job = dashboard.create_job(CreateJobInput {
                form_values: JobFormValues {
                    name: Some(name),
                    job_type,
                    description,
                    candidates_needed,
                    min_salary,
                    max_salary,
                },
                profile_fields: default_profile_fields(),
                status: if publish {
                    JobStatus::Active
                } else {
                    JobStatus::Draft
                },
            })?;
            println!("{}", dashboard.take_notice().unwrap_or_default());
            println!("id: {}", job.id);
        }
        JobsAction::Show { id } => {
            let Some(job) = JobSelector::new(&state.store).get_by_id(&id) else {
                anyhow::bail!("job {} not found", id);
            };
            print_job_detail(&job);
        }
        JobsAction::Publish { id } => {
            let mut dashboard = AdminDashboard::new(state);
            if dashboard.publish(&id)?.is_none() {
                anyhow::bail!("job {} not found", id);
            }
            println!("{}", dashboard.take_notice().unwrap_or_default());
        }
        JobsAction::Delete { id } => {
            let mut dashboard = AdminDashboard::new(state);
            if !dashboard.delete_job(&id)? {
                anyhow::bail!("job {} not found", id);
            }
            println!("{}", dashboard.take_notice().unwrap_or_default());
        }
    }
    Ok(())
}

fn board(state: AppState, job: Option<String>) -> Result<()> {
    let mut user = UserDashboard::new(state);
    match job {
        Some(id) => {
            if !user.select(&id) {
                anyhow::bail!("job {} is not open", id);
            }
            if let Some(job) = user.selected_job() {
                print_job_detail(job);
            }
        }
        None => print_job_list("OPEN ROLES", user.jobs()),
    }
    Ok(())
}

fn candidates(state: AppState, job_id: &str, page: usize) -> Result<()> {
    let Some(mut view) = CandidatesPage::open(state.clone(), job_id) else {
        // unknown job falls back to the admin job list
        let dashboard = AdminDashboard::new(state);
        print_job_list("DRAFTS", dashboard.drafts());
        print_job_list("ACTIVE", dashboard.active());
        return Ok(());
    };
    view.table_mut().set_page(page);
    print_candidates(view.job(), view.table());
    Ok(())
}

fn apply(state: AppState, job_id: &str, fields: &[String]) -> Result<()> {
    let Some(mut form) = ApplyForm::open(state, job_id) else {
        anyhow::bail!("job {} not found", job_id);
    };
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            anyhow::bail!("invalid field {:?}, expected key=value", field);
        };
        form.set_field(key, value);
    }
    let candidate = form.submit()?;
    println!(
        "application to {} recorded as {}",
        form.job().form_values.display_name(),
        candidate.id
    );
    Ok(())
}

fn print_job_list(heading: &str, jobs: &[StoredJob]) {
    println!("{} ({})", heading, jobs.len());
    println!(
        "{:<18} {:<28} {:<14} {:<28} {}",
        "ID", "Name", "Type", "Date", "Salary"
    );
    for job in jobs {
        println!(
            "{:<18} {:<28} {:<14} {:<28} {}",
            job.id,
            job.form_values.display_name(),
            job.form_values.job_type.as_deref().unwrap_or("-"),
            job.display_date(),
            job.form_values.salary_summary(),
        );
    }
    println!();
}

fn print_job_detail(job: &StoredJob) {
    println!("{}", job.form_values.display_name());
    println!("  id:          {}", job.id);
    println!("  status:      {:?}", job.status);
    println!("  date:        {}", job.display_date());
    println!(
        "  type:        {}",
        job.form_values.job_type.as_deref().unwrap_or("Not specified")
    );
    println!("  salary:      {}", job.form_values.salary_detail());
    println!(
        "  needed:      {}",
        job.form_values
            .candidates_needed
            .as_deref()
            .unwrap_or("Not specified")
    );
    if let Some(description) = &job.form_values.description {
        println!("  description: {}", description);
    }
}

fn print_candidates(job: &StoredJob, table: &CandidatesTable) {
    println!(
        "Candidates for {} ({})",
        job.form_values.display_name(),
        job.id
    );
    let mut header = String::new();
    for column in table.ordered_columns() {
        let width = char_width(table.width_of(&column.key));
        header.push_str(&format!("{:<width$.width$} ", column.label));
    }
    println!("{}", header.trim_end());
    for candidate in table.visible() {
        let mut row = String::new();
        for column in table.ordered_columns() {
            let width = char_width(table.width_of(&column.key));
            let value = if column.key == SUBMITTED_COLUMN_KEY {
                candidate.submitted_at.as_str()
            } else {
                candidate.attribute(&column.key).unwrap_or("-")
            };
            row.push_str(&format!("{:<width$.width$} ", value));
        }
        println!("{}", row.trim_end());
    }
    println!(
        "page {} of {} ({} candidates)",
        table.current_page(),
        table.total_pages(),
        table.candidate_count()
    );
}

// pixel widths from the view model, eight pixels to a character
fn char_width(px: i32) -> usize {
    (px / 8).max(8) as usize
}
