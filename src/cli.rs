use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;

use remote_nomads::config::Config;
use remote_nomads::forms::auth_form::{LoginForm, ResetPasswordForm, SignupForm};
use remote_nomads::forms::job_form::JobForm;
use remote_nomads::forms::profile_form::ProfileForm;
use remote_nomads::forms::user_form::UserForm;
use remote_nomads::forms::FormMode;
use remote_nomads::models::application::ApplicationStatus;
use remote_nomads::models::job::{JobStatus, JobType};
use remote_nomads::models::user::{UserRole, UserStatus};
use remote_nomads::models::ResourceId;
use remote_nomads::routes::{resolve, Route};
use remote_nomads::services::export_service::ExportService;
use remote_nomads::services::notification_service::{ConsoleNotifier, Notifier};
use remote_nomads::services::profile_service::CvUpload;
use remote_nomads::utils::time::format_date;
use remote_nomads::views::admin_dashboard::AdminTab;
use remote_nomads::views::job_board::JobFilter;
use remote_nomads::views::job_details::JobDetailsState;
use remote_nomads::views::my_applications::ApplicationSort;
use remote_nomads::AppState;

#[derive(Parser, Debug)]
#[command(
    name = "nomads",
    about = "Browse, apply to and manage Remote Nomads job postings",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Create a new account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, value_enum, default_value_t = RoleArg::Candidate)]
        role: RoleArg,
    },
    /// Set a new password using the token from a reset link
    ResetPassword {
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        password: String,
    },
    /// Show the signed-in user
    Whoami,
    /// Job postings
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
    /// Applications and their review workflow
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// User administration
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
    /// Candidate profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// Admin overview
    Dashboard {
        #[arg(long, value_enum, default_value_t = TabArg::Users)]
        tab: TabArg,
    },
}

#[derive(Subcommand, Debug)]
enum JobsCommand {
    /// List jobs, optionally filtered
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long = "type", value_enum)]
        job_type: Option<JobTypeArg>,
        #[arg(long, default_value = "")]
        location: String,
        /// Admin listing (searches title, company and industry)
        #[arg(long)]
        manage: bool,
    },
    /// Show one job
    Show { id: String },
    /// Apply to a job
    Apply { id: String },
    /// Save or unsave a job
    Save { id: String },
    /// Create a job posting
    Create(JobArgs),
    /// Update a job posting
    Update {
        id: String,
        #[command(flatten)]
        fields: JobArgs,
    },
    /// Delete a job posting
    Delete { id: String },
}

#[derive(Args, Debug, Default)]
struct JobArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long = "type", value_enum)]
    job_type: Option<JobTypeArg>,
    #[arg(long)]
    salary: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    industry: Option<String>,
    /// Comma-separated
    #[arg(long)]
    skills: Option<String>,
    #[arg(long)]
    expiry_date: Option<String>,
    #[arg(long, value_enum)]
    status: Option<JobStatusArg>,
    #[arg(long)]
    timezone: Option<String>,
}

impl JobArgs {
    fn apply_to(self, form: &mut JobForm) {
        let JobArgs {
            title,
            company,
            location,
            job_type,
            salary,
            description,
            industry,
            skills,
            expiry_date,
            status,
            timezone,
        } = self;
        if let Some(v) = title {
            form.title = v;
        }
        if let Some(v) = company {
            form.company = v;
        }
        if let Some(v) = location {
            form.location = v;
        }
        if let Some(v) = job_type {
            form.job_type = v.into();
        }
        if let Some(v) = salary {
            form.salary_range = v;
        }
        if let Some(v) = description {
            form.description = v;
        }
        if let Some(v) = industry {
            form.industry = v;
        }
        if let Some(v) = skills {
            form.skills = v;
        }
        if let Some(v) = expiry_date {
            form.expiry_date = v;
        }
        if let Some(v) = status {
            form.status = v.into();
        }
        if let Some(v) = timezone {
            form.timezone = v;
        }
    }
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// Reviewer listing of every application
    List {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// The signed-in candidate's applications
    Mine {
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
        #[arg(long, value_enum, default_value_t = SortArg::Newest)]
        sort: SortArg,
    },
    /// Move an application to another status
    Transition {
        id: String,
        #[arg(value_enum)]
        status: StatusArg,
    },
    /// Per-status totals
    Counts,
    /// Write applications to a file
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    List {
        #[arg(long, default_value = "")]
        search: String,
    },
    Create(UserArgs),
    Update {
        id: String,
        #[command(flatten)]
        fields: UserArgs,
    },
    Delete {
        id: String,
    },
}

#[derive(Args, Debug, Default)]
struct UserArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    password: Option<String>,
    #[arg(long, value_enum)]
    role: Option<RoleArg>,
    #[arg(long, value_enum)]
    status: Option<UserStatusArg>,
}

impl UserArgs {
    fn apply_to(self, form: &mut UserForm) {
        if let Some(v) = self.name {
            form.full_name = v;
        }
        if let Some(v) = self.email {
            form.email = v;
        }
        if let Some(v) = self.password {
            form.password = v;
        }
        if let Some(v) = self.role {
            form.role = v.into();
        }
        if let Some(v) = self.status {
            form.status = v.into();
        }
    }
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    Update {
        /// `field=value`, repeatable
        #[arg(long = "set", value_parser = parse_key_value)]
        set: Vec<(String, String)>,
        /// CV file to upload with the update
        #[arg(long)]
        cv: Option<PathBuf>,
    },
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .ok_or_else(|| format!("expected field=value, got '{}'", raw))
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum RoleArg {
    Admin,
    Recruiter,
    Candidate,
}

impl From<RoleArg> for UserRole {
    fn from(value: RoleArg) -> Self {
        match value {
            RoleArg::Admin => UserRole::Admin,
            RoleArg::Recruiter => UserRole::Recruiter,
            RoleArg::Candidate => UserRole::Candidate,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum UserStatusArg {
    Active,
    Inactive,
    Pending,
}

impl From<UserStatusArg> for UserStatus {
    fn from(value: UserStatusArg) -> Self {
        match value {
            UserStatusArg::Active => UserStatus::Active,
            UserStatusArg::Inactive => UserStatus::Inactive,
            UserStatusArg::Pending => UserStatus::Pending,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StatusArg {
    Pending,
    Reviewed,
    Shortlisted,
    Accepted,
    Rejected,
}

impl From<StatusArg> for ApplicationStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Pending => ApplicationStatus::Pending,
            StatusArg::Reviewed => ApplicationStatus::Reviewed,
            StatusArg::Shortlisted => ApplicationStatus::Shortlisted,
            StatusArg::Accepted => ApplicationStatus::Accepted,
            StatusArg::Rejected => ApplicationStatus::Rejected,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum JobTypeArg {
    FullTime,
    PartTime,
    Contract,
    Freelance,
    Internship,
}

impl From<JobTypeArg> for JobType {
    fn from(value: JobTypeArg) -> Self {
        match value {
            JobTypeArg::FullTime => JobType::FullTime,
            JobTypeArg::PartTime => JobType::PartTime,
            JobTypeArg::Contract => JobType::Contract,
            JobTypeArg::Freelance => JobType::Freelance,
            JobTypeArg::Internship => JobType::Internship,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum JobStatusArg {
    Draft,
    Active,
    OnHold,
    Filled,
    Archived,
}

impl From<JobStatusArg> for JobStatus {
    fn from(value: JobStatusArg) -> Self {
        match value {
            JobStatusArg::Draft => JobStatus::Draft,
            JobStatusArg::Active => JobStatus::Active,
            JobStatusArg::OnHold => JobStatus::OnHold,
            JobStatusArg::Filled => JobStatus::Filled,
            JobStatusArg::Archived => JobStatus::Archived,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Newest,
    Oldest,
    Title,
}

impl From<SortArg> for ApplicationSort {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Newest => ApplicationSort::Newest,
            SortArg::Oldest => ApplicationSort::Oldest,
            SortArg::Title => ApplicationSort::Title,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum TabArg {
    Users,
    Jobs,
    Candidates,
}

impl From<TabArg> for AdminTab {
    fn from(value: TabArg) -> Self {
        match value {
            TabArg::Users => AdminTab::Users,
            TabArg::Jobs => AdminTab::Jobs,
            TabArg::Candidates => AdminTab::Candidates,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ExportFormat {
    Xlsx,
    Csv,
}

pub(crate) async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();
    let notifier: Arc<dyn Notifier> = Arc::new(ConsoleNotifier);
    let state = AppState::new(config, notifier)?;

    match cli.command {
        Command::Login { email, password } => login(&state, LoginForm { email, password }).await,
        Command::Logout => {
            state.auth_service.logout().await;
            state.notifier.success("Logged out successfully");
            Ok(())
        }
        Command::Signup {
            name,
            email,
            password,
            role,
        } => {
            let form = SignupForm {
                full_name: name,
                email,
                password,
                role: role.into(),
            };
            let message = report(&state, state.auth_service.register(form.to_request()).await, "Signup failed")?;
            state
                .notifier
                .success(message.as_deref().unwrap_or("Account created. You can now log in."));
            Ok(())
        }
        Command::ResetPassword { token, password } => {
            let route = resolve(Route::ResetPassword { token: token.clone() }, &state.session);
            if route == Route::Login {
                state
                    .notifier
                    .error("No reset token found. Please request a new password reset.");
                bail!("missing reset token");
            }
            let form = ResetPasswordForm {
                token,
                new_password: password,
            };
            report(
                &state,
                state.auth_service.reset_password(form.to_request()).await,
                "Invalid or expired token",
            )?;
            state.notifier.success("Password reset successful! Please log in.");
            Ok(())
        }
        Command::Whoami => {
            match state.session.user() {
                Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role),
                None => println!("Not signed in"),
            }
            Ok(())
        }
        Command::Jobs { command } => jobs(&state, command).await,
        Command::Applications { command } => applications(&state, command).await,
        Command::Users { command } => users(&state, command).await,
        Command::Profile { command } => profile(&state, command).await,
        Command::Dashboard { tab } => dashboard(&state, tab.into()).await,
    }
}

/// Refuse commands whose screen the guard would not show.
fn guard(state: &AppState, route: Route) -> anyhow::Result<()> {
    let landed = resolve(route.clone(), &state.session);
    if landed == route {
        return Ok(());
    }
    match landed {
        Route::Login => bail!("Please log in first (nomads login)"),
        _ => bail!("Admin access required for {}", route),
    }
}

fn report<T>(state: &AppState, result: remote_nomads::error::Result<T>, fallback: &str) -> anyhow::Result<T> {
    result.map_err(|e| {
        state.notifier.failure(&e, fallback);
        anyhow::Error::new(e)
    })
}

fn ensure(ok: bool) -> anyhow::Result<()> {
    if ok {
        Ok(())
    } else {
        bail!("request failed")
    }
}

async fn login(state: &AppState, form: LoginForm) -> anyhow::Result<()> {
    let user = report(state, state.auth_service.login(form.to_request()).await, "Login failed")?;
    state.notifier.success("Login successful!");
    info!(role = %user.role, "Signed in");
    Ok(())
}

async fn jobs(state: &AppState, command: JobsCommand) -> anyhow::Result<()> {
    match command {
        JobsCommand::List {
            search,
            job_type,
            location,
            manage,
        } => {
            if manage {
                guard(state, Route::Admin(AdminTab::Jobs))?;
                let mut view = state.job_management();
                ensure(view.load().await)?;
                view.set_search(search);
                for job in view.visible() {
                    println!(
                        "{:>6}  {:<32} {:<20} {:<10} {}",
                        job.id,
                        job.title,
                        job.company.as_deref().unwrap_or("-"),
                        job.status.as_ref().map(|s| s.label()).unwrap_or("-"),
                        job.application_count.unwrap_or(0)
                    );
                }
                return Ok(());
            }

            guard(state, Route::Jobs)?;
            let mut view = state.job_board();
            ensure(view.load().await)?;
            view.set_search(search);
            view.set_filter(JobFilter {
                job_type: job_type.map(Into::into),
                location,
            });
            for job in view.visible() {
                println!(
                    "{:>6}  {:<32} {:<20} {:<16} {:<10}{}",
                    job.id,
                    job.title,
                    job.company.as_deref().unwrap_or("-"),
                    job.location_or_default(),
                    job.job_type.as_ref().map(|t| t.label()).unwrap_or("-"),
                    if job.has_applied { "  (applied)" } else { "" }
                );
            }
            let stats = view.stats();
            println!("\n{} jobs available, {} applied", stats.total, stats.applied);
            Ok(())
        }
        JobsCommand::Show { id } => {
            let id = ResourceId::from(id);
            guard(state, Route::JobDetails(id.clone()))?;
            let mut view = state.job_details(id);
            view.load().await;
            match view.state() {
                JobDetailsState::Loaded(job) => {
                    println!("{} ({})", job.title, job.id);
                    println!("Company:  {}", job.company.as_deref().unwrap_or("-"));
                    println!("Location: {}", job.location_or_default());
                    if let Some(t) = &job.job_type {
                        println!("Type:     {}", t.label());
                    }
                    if let Some(salary) = &job.salary_range {
                        println!("Salary:   {}", salary);
                    }
                    println!("Posted:   {}", format_date(job.created_at));
                    if !view.skills().is_empty() {
                        println!("Skills:   {}", view.skills().join(", "));
                    }
                    if view.is_saved() {
                        println!("(saved)");
                    }
                    println!("\n{}", job.description);
                    Ok(())
                }
                JobDetailsState::NotFound => bail!("Job not found"),
                JobDetailsState::Loading => Ok(()),
            }
        }
        JobsCommand::Apply { id } => {
            let id = ResourceId::from(id);
            guard(state, Route::JobDetails(id.clone()))?;
            let mut view = state.job_details(id);
            view.load().await;
            if view.job().is_none() {
                bail!("Job not found");
            }
            ensure(view.apply().await)
        }
        JobsCommand::Save { id } => {
            let id = ResourceId::from(id);
            guard(state, Route::JobDetails(id.clone()))?;
            let mut view = state.job_details(id);
            report(state, view.toggle_saved(), "Failed to update saved jobs")?;
            Ok(())
        }
        JobsCommand::Create(args) => {
            guard(state, Route::Admin(AdminTab::Jobs))?;
            let mut form = JobForm::new();
            args.apply_to(&mut form);
            let mut view = state.job_management();
            ensure(view.save(&form).await)
        }
        JobsCommand::Update { id, fields } => {
            guard(state, Route::Admin(AdminTab::Jobs))?;
            let mut view = state.job_management();
            ensure(view.load().await)?;
            let id = ResourceId::from(id);
            let Some(job) = view.find(&id) else {
                bail!("Job {} not found", id);
            };
            let mut form = JobForm::edit(job);
            fields.apply_to(&mut form);
            ensure(view.save(&form).await)
        }
        JobsCommand::Delete { id } => {
            guard(state, Route::Admin(AdminTab::Jobs))?;
            let mut view = state.job_management();
            ensure(view.delete(&ResourceId::from(id)).await)
        }
    }
}

async fn applications(state: &AppState, command: ApplicationsCommand) -> anyhow::Result<()> {
    match command {
        ApplicationsCommand::List { search, status } => {
            guard(state, Route::Admin(AdminTab::Candidates))?;
            let mut view = state.review_board();
            ensure(view.load().await)?;
            view.set_search(search);
            view.set_status_filter(status.map(Into::into));
            for app in view.visible() {
                let actions: Vec<&str> = app.status.actions().iter().map(|a| a.label).collect();
                println!(
                    "{:>6}  {:<24} {:<28} {:<12} {:<12} [{}]",
                    app.id,
                    app.candidate_name.as_deref().unwrap_or("-"),
                    app.job_title,
                    format_date(app.applied_at),
                    app.status.label(),
                    actions.join(" | ")
                );
            }
            Ok(())
        }
        ApplicationsCommand::Mine { search, status, sort } => {
            guard(state, Route::Profile)?;
            let mut view = state.my_applications();
            ensure(view.load().await)?;
            view.set_search(search);
            view.set_status_filter(status.map(Into::into));
            view.set_sort(sort.into());
            for app in view.visible() {
                println!(
                    "{:>6}  {:<28} {:<20} {:<12} {}",
                    app.id,
                    app.job_title,
                    app.company.as_deref().unwrap_or("-"),
                    app.status.label(),
                    format_date(app.applied_at)
                );
            }
            let stats = view.stats();
            println!(
                "\nTotal {}  Active {}  In progress {}  Success rate {}%",
                stats.total, stats.active, stats.in_progress, stats.success_rate
            );
            Ok(())
        }
        ApplicationsCommand::Transition { id, status } => {
            guard(state, Route::Admin(AdminTab::Candidates))?;
            let mut view = state.review_board();
            ensure(view.load().await)?;
            ensure(view.transition(&ResourceId::from(id), status.into()).await)
        }
        ApplicationsCommand::Counts => {
            guard(state, Route::Admin(AdminTab::Candidates))?;
            let mut view = state.review_board();
            ensure(view.load().await)?;
            let counts = view.counts();
            for status in ApplicationStatus::ALL {
                println!("{:<12} {}", status.label(), counts.get(status));
            }
            println!("{:<12} {}", "Total", counts.total());
            Ok(())
        }
        ApplicationsCommand::Export { format, output } => match format {
            ExportFormat::Xlsx => {
                guard(state, Route::Admin(AdminTab::Candidates))?;
                let mut view = state.review_board();
                ensure(view.load().await)?;
                let bytes = report(state, view.export_xlsx(), "Export failed")?;
                let path = output.unwrap_or_else(|| PathBuf::from("applications.xlsx"));
                write_file(&path, &bytes).await?;
                state.notifier.success(&format!("Exported to {}", path.display()));
                Ok(())
            }
            ExportFormat::Csv => {
                guard(state, Route::Profile)?;
                let mut view = state.my_applications();
                ensure(view.load().await)?;
                let bytes = report(state, view.export_csv(), "Export failed")?;
                let path = output.unwrap_or_else(|| PathBuf::from(ExportService::csv_file_name()));
                write_file(&path, &bytes).await
            }
        },
    }
}

async fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    tokio::fs::write(path, bytes)
        .await
        .with_context(|| format!("failed to write {}", path.display()))
}

async fn users(state: &AppState, command: UsersCommand) -> anyhow::Result<()> {
    guard(state, Route::Admin(AdminTab::Users))?;
    let mut view = state.user_management();
    match command {
        UsersCommand::List { search } => {
            ensure(view.load().await)?;
            view.set_search(search);
            for user in view.visible() {
                println!(
                    "{:>6}  {:<24} {:<30} {:<10} {}",
                    user.id,
                    user.display_name(),
                    user.email,
                    user.role.map(|r| r.as_str()).unwrap_or("-"),
                    user.status.map(|s| s.as_str()).unwrap_or("-")
                );
            }
            Ok(())
        }
        UsersCommand::Create(args) => {
            let mut form = UserForm::new();
            args.apply_to(&mut form);
            ensure(view.save(&form).await)
        }
        UsersCommand::Update { id, fields } => {
            ensure(view.load().await)?;
            let id = ResourceId::from(id);
            let mut form = match view.find(&id) {
                Some(user) => UserForm::edit(user),
                None => UserForm {
                    mode: FormMode::Edit(id.clone()),
                    ..UserForm::new()
                },
            };
            fields.apply_to(&mut form);
            ensure(view.save(&form).await)
        }
        UsersCommand::Delete { id } => ensure(view.delete(&ResourceId::from(id)).await),
    }
}

async fn profile(state: &AppState, command: ProfileCommand) -> anyhow::Result<()> {
    guard(state, Route::Profile)?;
    let current = report(state, state.profile_service.get().await, "Failed to load profile")?;
    match command {
        ProfileCommand::Show => {
            let form = ProfileForm::from_profile(&current);
            for (field, value) in form.update.fields() {
                println!("{:<11} {}", field, if value.is_empty() { "-" } else { value });
            }
            if let Some(cv) = &current.cv_path {
                println!("{:<11} {}", "cv", cv);
            }
            Ok(())
        }
        ProfileCommand::Update { set, cv } => {
            let mut form = ProfileForm::from_profile(&current);
            for (field, value) in set {
                if !form.set(&field, value) {
                    bail!("unknown profile field '{}'", field);
                }
            }
            let cv = match cv {
                Some(path) => Some(report(state, CvUpload::from_path(&path).await, "Failed to read CV")?),
                None => None,
            };
            report(
                state,
                state.profile_service.update(&form.update, cv).await,
                "Failed to update profile",
            )?;
            state.notifier.success("Profile updated successfully!");
            Ok(())
        }
    }
}

async fn dashboard(state: &AppState, tab: AdminTab) -> anyhow::Result<()> {
    guard(state, Route::Admin(tab))?;
    let mut view = state.admin_dashboard();
    view.select_tab(tab);
    ensure(view.load().await)?;
    let stats = view.stats();
    println!("Total users   {}", stats.total_users);
    println!("Active jobs   {}", stats.active_jobs);
    println!("Applications  {}", stats.applications);
    println!("Fill rate     {}%", stats.fill_rate);
    println!("\n[{}]", view.tab().label());
    Ok(())
}
