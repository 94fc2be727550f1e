use std::fmt::Write;

use crate::bulletin::{recipient_choices, BulletinComposer};
use crate::digest::{digest_cards, CardVariant, format_report_date, score_bar};
use crate::models::{DashboardData, HelpRequest};
use crate::planner::LessonQueue;
use crate::routes::{Route, NAV_ITEMS};
use crate::students;

const BAR_WIDTH: usize = 20;

pub fn render_shell(active: Route, teacher: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Nabha Scholars");
    let _ = writeln!(output, "Teacher Dashboard · Welcome, {teacher}");
    let _ = writeln!(output);

    let nav: Vec<String> = NAV_ITEMS
        .iter()
        .map(|item| {
            if item.route == active {
                format!("[{}]", item.label)
            } else {
                item.label.to_string()
            }
        })
        .collect();
    let _ = writeln!(output, "{}", nav.join(" | "));
    let _ = writeln!(output);
    output
}

pub fn render_digest(data: &DashboardData) -> String {
    let mut output = String::new();
    let digest = &data.daily_digest;

    let _ = writeln!(output, "## Daily Digest");
    let _ = writeln!(
        output,
        "Snapshot from {}",
        format_report_date(data.report_date)
    );
    let _ = writeln!(output);

    for card in digest_cards(digest) {
        let _ = write!(output, "- {}: {}", card.title, card.value);
        if let Some(trend) = card.trend_line() {
            let _ = write!(output, " ({trend})");
        }
        match card.variant {
            CardVariant::Success => output.push_str(" [on track]"),
            CardVariant::Warning => output.push_str(" [watch]"),
            CardVariant::Default => {}
        }
        let _ = writeln!(output);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "### Top Struggle Concept");
    let _ = writeln!(output, "{}", digest.top_struggle_concept);
    let _ = writeln!(
        output,
        "This topic had the most incorrect answers yesterday. Consider reviewing this concept with the class."
    );

    let _ = writeln!(output);
    let _ = writeln!(output, "### Subject Performance (Yesterday)");
    if data.subject_performance.is_empty() {
        let _ = writeln!(output, "No subject scores recorded.");
    } else {
        for entry in &data.subject_performance {
            let _ = writeln!(
                output,
                "{:<16} {} {}",
                entry.subject,
                score_bar(entry.score, BAR_WIDTH),
                entry.score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "### Class Average Trend (7 Days)");
    if data.weekly_trend.is_empty() {
        let _ = writeln!(output, "No trend data recorded.");
    } else {
        for entry in &data.weekly_trend {
            let _ = writeln!(
                output,
                "{:<16} {} {}",
                entry.day,
                score_bar(entry.score, BAR_WIDTH),
                entry.score
            );
        }
    }

    output
}

pub fn render_students(data: &DashboardData, search_term: &str) -> String {
    let mut output = String::new();
    let flagged = students::flagged(&data.student_reports);
    let filtered = students::search(&data.student_reports, search_term);

    let _ = writeln!(output, "## Students Overview");
    let _ = writeln!(output);
    let _ = writeln!(
        output,
        "### Students Needing Attention ({})",
        flagged.len()
    );

    if flagged.is_empty() {
        let _ = writeln!(output, "Great! No students need immediate attention today.");
    } else {
        for student in &flagged {
            let style = students::classify(student.flag_type);
            let _ = writeln!(
                output,
                "- {} {}: {} [{} · {}] score {}%",
                style.icon.glyph(),
                student.name,
                student.flag.as_deref().unwrap_or_default(),
                students::flag_badge(student),
                style.badge.label(),
                student.avg_score
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "### All Students");
    if !search_term.is_empty() {
        let _ = writeln!(output, "Search: \"{search_term}\"");
    }

    if filtered.is_empty() {
        let _ = writeln!(output, "No students match this search.");
        return output;
    }

    let _ = writeln!(
        output,
        "| Student Name | Last Active | Avg. Score | Time on App | Status |"
    );
    let _ = writeln!(output, "|---|---|---|---|---|");
    for student in filtered {
        let band = students::score_band(student.avg_score);
        let _ = writeln!(
            output,
            "| {} | {} | {}% ({}) | {} | {} |",
            student.name,
            student.last_active,
            student.avg_score,
            band.tone(),
            student.time_on_app,
            students::status_label(student)
        );
    }

    output
}

pub fn render_planner(data: &DashboardData, queue: &LessonQueue) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "## Content Planner");
    let _ = writeln!(output, "Plan tomorrow's lessons and activities for your students");
    let _ = writeln!(output);
    let _ = writeln!(output, "### Available Lessons");

    if data.available_lessons.is_empty() {
        let _ = writeln!(output, "No lessons available.");
    }
    for entry in &data.available_lessons {
        let _ = writeln!(output, "**{}**", entry.subject);
        for lesson in &entry.lessons {
            let marker = queue
                .position(&lesson.id)
                .map_or_else(|| "[ ]".to_string(), |position| format!("[#{position}]"));
            let _ = writeln!(
                output,
                "- {} {} {} ({})",
                marker, lesson.id, lesson.title, lesson.chapter
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "### Tomorrow's Queue ({})", queue.len());
    if queue.is_empty() {
        let _ = writeln!(output, "No lessons queued yet. Add lessons from the catalog.");
    } else {
        for (index, item) in queue.items().iter().enumerate() {
            let _ = writeln!(
                output,
                "#{} [{}] {} ({})",
                index + 1,
                item.subject,
                item.title,
                item.chapter
            );
        }
    }

    output
}

pub fn render_help_requests(requests: &[HelpRequest]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "### Help Request Inbox ({})", requests.len());

    if requests.is_empty() {
        let _ = writeln!(output, "No help requests received.");
        let _ = writeln!(output, "Students haven't requested help recently.");
        return output;
    }

    for request in requests {
        let _ = writeln!(
            output,
            "- {} · {} · {}",
            request.student_name, request.subject, request.date
        );
        let _ = writeln!(output, "  {}", request.lesson);
        let _ = writeln!(output, "  \"{}\"", request.message);
    }

    output
}

pub fn render_bulletin_board(data: &DashboardData, composer: &BulletinComposer) -> String {
    let mut output = String::new();
    let draft = composer.draft();

    let _ = writeln!(output, "## Bulletin Board");
    let _ = writeln!(output, "Manage help requests and send messages to students");
    let _ = writeln!(output);
    output.push_str(&render_help_requests(&data.help_requests));

    let _ = writeln!(output);
    let _ = writeln!(output, "### Compose Bulletin");
    let choices: Vec<String> = recipient_choices(&data.student_reports)
        .iter()
        .map(ToString::to_string)
        .collect();
    let _ = writeln!(output, "Recipients: {}", choices.join(", "));
    let _ = writeln!(output, "Send to: {}", draft.recipient);
    let _ = writeln!(output, "{}", draft.counter());
    let _ = writeln!(
        output,
        "Messages are delivered during tomorrow's evening sync (after school hours)."
    );

    output
}

pub fn render_not_found(path: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "## 404");
    let _ = writeln!(output, "Oops! Page not found: {path}");
    let _ = writeln!(output, "Return to Home: /");
    output
}

/// A page as it looks when first opened: empty queue, empty draft, no search.
pub fn render_route(route: Route, path: &str, data: &DashboardData, teacher: &str) -> String {
    let body = match route {
        Route::Digest => render_digest(data),
        Route::Students => render_students(data, ""),
        Route::ContentPlanner => render_planner(data, &LessonQueue::new()),
        Route::BulletinBoard => render_bulletin_board(data, &BulletinComposer::new()),
        Route::NotFound => return render_not_found(path),
    };
    let mut output = render_shell(route, teacher);
    output.push_str(&body);
    output
}

pub fn build_report(data: &DashboardData, teacher: &str) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Nabha Scholars Dashboard Report");
    let _ = writeln!(
        output,
        "Prepared for {} (snapshot from {})",
        teacher,
        format_report_date(data.report_date)
    );
    let _ = writeln!(output);

    let sections = [
        render_digest(data),
        render_students(data, ""),
        render_planner(data, &LessonQueue::new()),
        render_bulletin_board(data, &BulletinComposer::new()),
    ];
    output.push_str(&sections.join("\n"));
    output
}
