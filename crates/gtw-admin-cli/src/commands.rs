//! One handler per console view

use crate::app::{App, CliError, CliResult};
use crate::render::{Table, details, truncate};
use crate::{
    CaseStudyCommands, Commands, FrameworkPdfCommands, PageArgs, PasswordCommands, StoryArgs,
    SubmissionCommands, SubscriptionCommands, SuccessStoryCommands,
};
use chrono::{DateTime, Utc};
use gtw_admin_core::api::auth::PasswordReset;
use gtw_admin_core::api::{SubmissionSource, completion_counts, filter_submissions};
use gtw_admin_core::export::{default_export_file_name, export_subscriptions};
use gtw_admin_core::sign_in;
use gtw_admin_types::format::{format_timestamp, or_not_available, yes_no};
use gtw_admin_types::{
    Acknowledgement, AgencyPartnership, CaseStudy, CaseStudyDraft, CompletionFilter,
    GetStartedForm, JoinTeamApplication, Route, Section, StepBadge, Submission, Subscription,
    SubscriptionFilter, SuccessStoryDraft,
};
use std::path::Path;

/// Dispatch a parsed command
pub(crate) async fn run(app: &App, command: Commands) -> CliResult<()> {
    match command {
        Commands::Login { username, password } => login(app, &username, &password).await,
        Commands::Logout => {
            app.session.init();
            app.tokens.clear()?;
            app.session.logout();
            println!("Signed out.");
            Ok(())
        }
        Commands::Whoami => {
            whoami(app);
            Ok(())
        }
        Commands::Password { action } => password(app, action).await,
        Commands::Dashboard => dashboard(app).await,
        Commands::Forms { action } => submissions::<GetStartedForm>(app, action).await,
        Commands::Applications { action } => submissions::<JoinTeamApplication>(app, action).await,
        Commands::Partnerships { action } => submissions::<AgencyPartnership>(app, action).await,
        Commands::Subscriptions { action } => subscriptions(app, action).await,
        Commands::FrameworkPdf { action } => framework_pdf(app, action).await,
        Commands::CaseStudies { action } => case_studies(app, action).await,
        Commands::SuccessStories { action } => success_stories(app, action).await,
        Commands::Config => {
            let text = serde_json::to_string_pretty(&app.config).map_err(gtw_admin_core::Error::from)?;
            println!("{text}");
            Ok(())
        }
    }
}

async fn login(app: &App, username: &str, password: &str) -> CliResult<()> {
    app.enter(Route::Login)?;
    let admin = sign_in(&app.api.auth, &app.session, username, password)
        .await
        .map_err(|e| CliError::Login(e.user_message()))?;
    app.navigator.navigate(Route::Dashboard);
    let user = admin.record();
    println!("Login successful! Signed in as {} <{}>.", user.name, user.email);
    Ok(())
}

fn whoami(app: &App) {
    let view = app.session.init();
    match view.user {
        Some(user) => print!(
            "{}",
            details(
                "Signed in",
                &[
                    ("Name", user.name),
                    ("Email", user.email),
                    ("Role", user.role.to_string()),
                    ("ID", user.id),
                ],
            )
        ),
        None if app.tokens.is_empty() => println!("Not signed in."),
        None => println!("Stored session is incomplete. Run `gtw-admin login` again."),
    }
}

fn acknowledge(ack: Acknowledgement, success: &str, failure: &str) -> CliResult<()> {
    if ack.success {
        println!("{}", ack.message.as_deref().unwrap_or(success));
        Ok(())
    } else {
        Err(CliError::Input(ack.message.unwrap_or_else(|| failure.to_string())))
    }
}

async fn password(app: &App, action: PasswordCommands) -> CliResult<()> {
    app.enter(Route::ForgotPassword)?;
    let auth = &app.api.auth;
    match action {
        PasswordCommands::Forgot { email } => acknowledge(
            auth.send_reset_otp(&email).await?,
            "OTP sent to your email!",
            "Failed to send OTP",
        ),
        PasswordCommands::Verify { email, otp } => acknowledge(
            auth.verify_otp(&email, &otp).await?,
            "OTP verified successfully!",
            "Invalid OTP",
        ),
        PasswordCommands::Reset {
            email,
            otp,
            new_password,
            confirm_password,
        } => {
            let reset = PasswordReset {
                email,
                otp,
                new_password,
                confirm_password,
            };
            let ack = auth.reset_password(&reset).await?;
            acknowledge(
                ack,
                "Password reset successfully! Please login with your new password.",
                "Failed to reset password",
            )?;
            app.navigator.navigate(Route::Login);
            Ok(())
        }
    }
}

async fn dashboard(app: &App) -> CliResult<()> {
    app.enter(Route::Dashboard)?;
    let summary = app.api.dashboard.summary().await?;

    println!("{}\n", Route::Dashboard.title());
    let mut totals = Table::new(["Source", "Total"]);
    totals.row(["Get Started Forms".to_string(), summary.total_get_started.to_string()]);
    totals.row(["Join Team Applications".to_string(), summary.total_join_team.to_string()]);
    totals.row([
        "Agency Partnerships".to_string(),
        summary.total_agency_partnership.to_string(),
    ]);
    totals.row(["All submissions".to_string(), summary.total().to_string()]);
    print!("{}", totals.render());

    println!("\nRecent Activity");
    if summary.recent_activity.is_empty() {
        println!("No recent activity");
        return Ok(());
    }
    let mut table = Table::new(["Type", "Name", "Email / Website", "Date"]);
    for item in &summary.recent_activity {
        table.row([
            item.kind.to_string(),
            item.name.clone(),
            item.contact.clone(),
            format_timestamp(item.date.as_ref()),
        ]);
    }
    print!("{}", table.render());
    Ok(())
}

/// How a submission type is shown
trait SubmissionView: SubmissionSource {
    const ROUTE: Route;
    const NOUN: &'static str;

    fn columns() -> &'static [&'static str];
    fn row(&self) -> Vec<String>;
    fn fields(&self) -> Vec<(&'static str, String)>;
}

fn progress(step: Option<u8>) -> String {
    let badge = match StepBadge::for_step(step) {
        StepBadge::Complete => "complete",
        StepBadge::Advanced => "advanced",
        StepBadge::Early => "early",
    };
    step.map_or_else(|| format!("-/5 ({badge})"), |s| format!("{s}/5 ({badge})"))
}

const fn status(completed: bool) -> &'static str {
    if completed { "Completed" } else { "In Progress" }
}

fn text(value: Option<&str>) -> String {
    or_not_available(value).to_string()
}

fn list(values: &[String]) -> String {
    if values.is_empty() {
        text(None)
    } else {
        values.join(", ")
    }
}

fn common_fields<T: Submission>(
    item: &T,
    submitted_at: Option<&DateTime<Utc>>,
) -> [(&'static str, String); 4] {
    [
        ("Progress", progress(item.current_step())),
        ("Status", status(item.is_completed()).to_string()),
        ("Created", format_timestamp(item.created_at())),
        ("Submitted", format_timestamp(submitted_at)),
    ]
}

impl SubmissionView for GetStartedForm {
    const ROUTE: Route = Route::GetStartedForms;
    const NOUN: &'static str = "Get started form";

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Project Type", "Step", "Status", "Created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            text(self.name.as_deref()),
            text(self.email.as_deref()),
            text(self.project_type.as_deref()),
            progress(self.current_step),
            status(self.is_completed).to_string(),
            format_timestamp(self.created_at.as_ref()),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Name", text(self.name.as_deref())),
            ("Email", text(self.email.as_deref())),
            ("Project Type", text(self.project_type.as_deref())),
            ("Company", text(self.company_name.as_deref())),
            ("Company Type", text(self.company_type.as_deref())),
            ("Budget", text(self.budget_range.as_deref())),
            ("Start Time", text(self.start_time.as_deref())),
            ("Post-launch Support", text(self.post_launch_support.as_deref())),
            ("Notes", text(self.additional_notes.as_deref())),
            ("Documents", self.documents.len().to_string()),
        ];
        for (key, value) in &self.track_specific_answers {
            let value = value
                .as_str()
                .map_or_else(|| value.to_string(), str::to_string);
            fields.push(("Track Answer", format!("{key}: {value}")));
        }
        fields.extend(common_fields(self, self.submitted_at.as_ref()));
        fields
    }
}

impl SubmissionView for JoinTeamApplication {
    const ROUTE: Route = Route::JoinTeam;
    const NOUN: &'static str = "Application";

    fn columns() -> &'static [&'static str] {
        &["ID", "Name", "Email", "Role", "Experience", "Step", "Status", "Created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            text(self.name.as_deref()),
            text(self.email.as_deref()),
            text(self.role.as_deref()),
            text(self.experience.as_deref()),
            progress(self.current_step),
            status(self.is_completed).to_string(),
            format_timestamp(self.created_at.as_ref()),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Name", text(self.name.as_deref())),
            ("Email", text(self.email.as_deref())),
            ("Phone", text(self.phone.as_deref())),
            ("Role", text(self.role.as_deref())),
            ("Experience", text(self.experience.as_deref())),
            ("Skills", list(&self.skills)),
            ("Resume", text(self.resume_url.as_deref())),
            ("Portfolio / GitHub", text(self.portfolio_or_github.as_deref())),
            ("LinkedIn", text(self.linkedin_profile.as_deref())),
            ("Location", text(self.current_location.as_deref())),
            ("Willing to Relocate", yes_no(self.willing_to_relocate).to_string()),
            ("Open to Freelance", yes_no(self.open_to_freelance).to_string()),
            ("Start Time", text(self.start_time.as_deref())),
            ("Proudest Project", text(self.proud_project.as_deref())),
            ("Why GTW", text(self.why_join_gtw.as_deref())),
            ("Agreed to Terms", yes_no(self.agreed_to_terms).to_string()),
        ];
        fields.extend(common_fields(self, self.submitted_at.as_ref()));
        fields
    }
}

impl SubmissionView for AgencyPartnership {
    const ROUTE: Route = Route::AgencyPartnership;
    const NOUN: &'static str = "Partnership request";

    fn columns() -> &'static [&'static str] {
        &["ID", "Agency", "Website", "Location", "Team Size", "Step", "Status", "Created"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            text(self.agency_name.as_deref()),
            text(self.website_url.as_deref()),
            text(self.location.as_deref()),
            text(self.team_size.as_deref()),
            progress(self.current_step),
            status(self.is_completed).to_string(),
            format_timestamp(self.created_at.as_ref()),
        ]
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        let free_form = |value: Option<&serde_json::Value>| {
            value.map_or_else(|| text(None), serde_json::Value::to_string)
        };
        let mut fields = vec![
            ("ID", self.id.clone()),
            ("Agency", text(self.agency_name.as_deref())),
            ("Website", text(self.website_url.as_deref())),
            ("Location", text(self.location.as_deref())),
            ("Team Size", text(self.team_size.as_deref())),
            ("Portfolio", text(self.portfolio_url.as_deref())),
            ("Time Zone", text(self.time_zone.as_deref())),
            ("Collaboration", text(self.collaboration_type.as_deref())),
            ("Specializations", list(&self.specializations)),
            ("Engagement Models", list(&self.engagement_models)),
            ("Recent Projects", free_form(self.recent_projects.as_ref())),
            ("Social Media", free_form(self.social_media.as_ref())),
            ("How Found Us", text(self.how_found_us.as_deref())),
            ("Does Not Do", text(self.what_not_do.as_deref())),
            ("Worked With Dev Partners", text(self.worked_with_dev_partners.as_deref())),
            ("Agreed to Terms", yes_no(self.agreed_to_terms).to_string()),
        ];
        fields.extend(common_fields(self, self.submitted_at.as_ref()));
        fields
    }
}

async fn submissions<T: SubmissionView>(app: &App, action: SubmissionCommands) -> CliResult<()> {
    app.enter(T::ROUTE)?;
    match action {
        SubmissionCommands::List { filter } => {
            let filter: CompletionFilter = filter.parse()?;
            let items = app.api.submissions.list::<T>().await?;
            let counts = completion_counts(&items);

            println!("{}", T::ROUTE.title());
            println!(
                "All ({}) | Completed ({}) | In Progress ({})\n",
                counts.all, counts.completed, counts.incomplete
            );

            let mut table = Table::new(T::columns().iter().copied());
            for item in filter_submissions(&items, filter) {
                table.row(item.row());
            }
            if table.is_empty() {
                println!("No submissions found");
            } else {
                print!("{}", table.render());
            }
            Ok(())
        }
        SubmissionCommands::Show { id } => {
            let item = app
                .api
                .submissions
                .find_by_id::<T>(&id)
                .await?
                .ok_or(CliError::NotFound { kind: T::NOUN, id })?;
            print!("{}", details(T::NOUN, &item.fields()));
            Ok(())
        }
    }
}

async fn subscriptions(app: &App, action: SubscriptionCommands) -> CliResult<()> {
    app.enter(Route::Subscriptions)?;
    let api = &app.api.subscriptions;
    match action {
        SubscriptionCommands::List { page } => {
            let (number, limit, filter) = page_selection(app, &page)?;
            let page = api.list(number, limit, filter).await?;

            println!("{}", Route::Subscriptions.title());
            println!("{}\n", subscription_stats(page.pagination.total, &page.subscriptions));
            if page.subscriptions.is_empty() {
                println!("No subscriptions found");
            } else {
                let mut table =
                    Table::new(["Email", "Status", "Subscribed At", "Unsubscribed At", "Source"]);
                for sub in &page.subscriptions {
                    table.row([
                        sub.email.clone(),
                        if sub.is_active { "Active" } else { "Inactive" }.to_string(),
                        format_timestamp(sub.subscribed_at.as_ref()),
                        format_timestamp(sub.unsubscribed_at.as_ref()),
                        text(sub.source.as_deref()),
                    ]);
                }
                print!("{}", table.render());
            }

            let pagination = page.pagination;
            if pagination.is_paginated() {
                println!(
                    "\nPage {} of {} ({} total)",
                    pagination.page, pagination.pages, pagination.total
                );
                if pagination.has_next() {
                    println!("Next: --page {}", pagination.page + 1);
                }
            }
            Ok(())
        }
        SubscriptionCommands::Unsubscribe { email } => {
            acknowledge(api.unsubscribe(&email).await?, "Successfully unsubscribed", "Failed to unsubscribe")
        }
        SubscriptionCommands::Delete { email } => acknowledge(
            api.delete(&email).await?,
            "Subscription deleted successfully",
            "Failed to delete subscription",
        ),
        SubscriptionCommands::Export { page, output } => {
            let (number, limit, filter) = page_selection(app, &page)?;
            let page = api.list(number, limit, filter).await?;
            let path = output.unwrap_or_else(|| default_export_file_name(Utc::now().date_naive()).into());
            export_subscriptions(&path, &page.subscriptions)?;
            println!("Exported {} subscriptions to {}", page.subscriptions.len(), path.display());
            Ok(())
        }
    }
}

/// Total from the server; active and inactive are counted on the shown page
fn subscription_stats(total: u64, subscriptions: &[Subscription]) -> String {
    let active = subscriptions.iter().filter(|sub| sub.is_active).count();
    format!(
        "Total Subscriptions: {total} | Active: {active} | Inactive: {}",
        subscriptions.len() - active
    )
}

fn page_selection(app: &App, page: &PageArgs) -> CliResult<(u32, u32, SubscriptionFilter)> {
    let filter: SubscriptionFilter = page.status.parse()?;
    let limit = page.limit.unwrap_or(app.config.api.page_size).max(1);
    Ok((page.page.max(1), limit, filter))
}

async fn framework_pdf(app: &App, action: FrameworkPdfCommands) -> CliResult<()> {
    app.enter(Route::FrameworkPdf)?;
    match action {
        FrameworkPdfCommands::List => {
            let entries = app.api.framework_pdf.list().await?;
            println!("{}\n", Route::FrameworkPdf.title());
            if entries.is_empty() {
                println!("No forms found");
                return Ok(());
            }
            let mut table = Table::new(["ID", "Name", "Email", "Phone", "Requested At"]);
            for entry in &entries {
                table.row([
                    entry.id.clone(),
                    text(entry.name.as_deref()),
                    text(entry.email.as_deref()),
                    text(entry.phone.as_deref()),
                    format_timestamp(entry.created_at.as_ref()),
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }
        FrameworkPdfCommands::Delete { id } => {
            acknowledge(app.api.framework_pdf.delete(&id).await?, "Form deleted", "Delete failed")
        }
    }
}

fn read_draft(path: &Path) -> CliResult<CaseStudyDraft> {
    let body = std::fs::read_to_string(path).map_err(gtw_admin_core::Error::from)?;
    serde_json::from_str(&body)
        .map_err(|e| CliError::Input(format!("{} is not a valid case study draft: {e}", path.display())))
}

fn section_lines(section: &Section) -> Vec<String> {
    match section {
        Section::Text { head, content } => vec![format!("[text] {head}"), format!("  {content}")],
        Section::Image {
            image_src,
            image_alt,
            content,
        } => vec![
            format!("[image] {image_src} ({image_alt})"),
            format!("  {content}"),
        ],
        Section::List { head, content } => std::iter::once(format!("[list] {head}"))
            .chain(content.iter().flat_map(|item| {
                [format!("  - {}", item.listing), format!("      {}", item.sub_listing)]
            }))
            .collect(),
        Section::List2 { head, content } => std::iter::once(format!("[list2] {head}"))
            .chain(content.iter().map(|item| format!("  - {}", item.listing)))
            .collect(),
        Section::Testimonial {
            quote,
            author,
            position,
        } => vec![format!("[testimonial] \"{quote}\""), format!("  {author}, {position}")],
        Section::Unknown => vec!["[unknown section]".to_string()],
    }
}

fn case_study_details(study: &CaseStudy) -> String {
    let mut out = details(
        &study.title,
        &[
            ("ID", study.id.clone()),
            ("Slug", study.slug.clone()),
            ("Category", text(study.category.as_deref())),
            ("Date", short_date(study.date.as_deref())),
            ("Tags", list(&study.tags)),
            ("Hero Image", text(study.hero_image.as_deref())),
            ("Meta Title", text(study.meta_title.as_deref())),
            ("Meta Description", text(study.meta_description.as_deref())),
        ],
    );
    out.push_str("\nSections\n");
    for section in &study.sections {
        for line in section_lines(section) {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

fn short_date(date: Option<&str>) -> String {
    text(date.and_then(|d| d.split('T').next()))
}

async fn case_studies(app: &App, action: CaseStudyCommands) -> CliResult<()> {
    app.enter(Route::CaseStudies)?;
    let api = &app.api.case_studies;
    match action {
        CaseStudyCommands::List => {
            let studies = api.list().await?;
            println!("{}\n", Route::CaseStudies.title());
            if studies.is_empty() {
                println!("No case studies found");
                return Ok(());
            }
            let mut table = Table::new(["ID", "Title", "Slug", "Category", "Date", "Tags"]);
            for study in &studies {
                table.row([
                    study.id.clone(),
                    truncate(&study.title, 40),
                    study.slug.clone(),
                    text(study.category.as_deref()),
                    short_date(study.date.as_deref()),
                    list(&study.tags),
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }
        CaseStudyCommands::Show { id } => {
            let study = api
                .find_by_id(&id)
                .await?
                .ok_or(CliError::NotFound { kind: "Case study", id })?;
            print!("{}", case_study_details(&study));
            Ok(())
        }
        CaseStudyCommands::Template { from, sections } => {
            let mut draft = match from {
                Some(id) => {
                    let study = api
                        .find_by_id(&id)
                        .await?
                        .ok_or(CliError::NotFound { kind: "Case study", id })?;
                    CaseStudyDraft::from_existing(&study)
                }
                None => CaseStudyDraft::default(),
            };
            draft
                .sections
                .extend(sections.iter().map(String::as_str).map(Section::empty));
            let json = serde_json::to_string_pretty(&draft).map_err(gtw_admin_core::Error::from)?;
            println!("{json}");
            Ok(())
        }
        CaseStudyCommands::Create { file } => {
            api.create(read_draft(&file)?).await?;
            println!("Case study created!");
            Ok(())
        }
        CaseStudyCommands::Update { id, file } => {
            api.update(&id, read_draft(&file)?).await?;
            println!("Case study updated!");
            Ok(())
        }
        CaseStudyCommands::Delete { id } => {
            api.delete(&id).await?;
            println!("Case study deleted!");
            Ok(())
        }
    }
}

impl From<StoryArgs> for SuccessStoryDraft {
    fn from(args: StoryArgs) -> Self {
        Self {
            founder_name: args.founder_name,
            founder_post: args.founder_post,
            description: args.description,
            photo: args.photo,
            logo: args.logo,
        }
    }
}

async fn success_stories(app: &App, action: SuccessStoryCommands) -> CliResult<()> {
    app.enter(Route::SuccessStories)?;
    let api = &app.api.success_stories;
    match action {
        SuccessStoryCommands::List => {
            let stories = api.list().await?;
            println!("{}\n", Route::SuccessStories.title());
            if stories.is_empty() {
                println!("No success stories found");
                return Ok(());
            }
            let mut table = Table::new(["ID", "Founder", "Position", "Description", "Photo", "Logo"]);
            for story in &stories {
                table.row([
                    story.id.clone(),
                    story.founder_name.clone(),
                    text(story.founder_post.as_deref()),
                    truncate(or_not_available(story.description.as_deref()), 50),
                    yes_no(Some(story.photo.is_some())).to_string(),
                    yes_no(Some(story.logo.is_some())).to_string(),
                ]);
            }
            print!("{}", table.render());
            Ok(())
        }
        SuccessStoryCommands::Create { story } => {
            api.create(&story.into()).await?;
            println!("New success story added!");
            Ok(())
        }
        SuccessStoryCommands::Update { id, story } => {
            api.update(&id, &story.into()).await?;
            println!("Success story updated!");
            Ok(())
        }
        SuccessStoryCommands::Delete { id } => {
            api.delete(&id).await?;
            println!("Story deleted!");
            Ok(())
        }
    }
}
