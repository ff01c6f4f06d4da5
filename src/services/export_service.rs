use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook};

use crate::error::{Error, Result};
use crate::models::application::{Application, ApplicationStatus, BadgeColor, StatusCounts};
use crate::utils::time;

pub const CSV_HEADERS: [&str; 5] = ["Job Title", "Company", "Status", "Applied Date", "Application ID"];

const XLSX_COLUMNS: [(&str, f64); 8] = [
    ("#", 6.0),
    ("Candidate", 28.0),
    ("Email", 30.0),
    ("Job Title", 32.0),
    ("Applied", 16.0),
    ("Last Updated", 16.0),
    ("Status", 16.0),
    ("CV", 10.0),
];
const HEADER_ROW: u32 = 1;
const HEADER_BG: Color = Color::RGB(0x0F172A);
const STRIPE_BG: Color = Color::RGB(0xF8FAFC);
const SUMMARY_BG: Color = Color::RGB(0xE0E7FF);
const BORDER: Color = Color::RGB(0xE2E8F0);

fn badge_color(badge: BadgeColor) -> Color {
    match badge {
        BadgeColor::Yellow => Color::RGB(0xF59E0B),
        BadgeColor::Blue => Color::RGB(0x3B82F6),
        BadgeColor::Purple => Color::RGB(0x8B5CF6),
        BadgeColor::Green => Color::RGB(0x10B981),
        BadgeColor::Red => Color::RGB(0xEF4444),
    }
}

fn cell(background: Color) -> Format {
    Format::new()
        .set_font_size(10)
        .set_background_color(background)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(BORDER)
}

fn banner(background: Color) -> Format {
    cell(background)
        .set_bold()
        .set_font_color(Color::White)
        .set_align(FormatAlign::Center)
}

pub struct ExportService;

impl ExportService {
    /// Reviewer workbook: one row per application with its status badge,
    /// then a per-status summary row.
    pub fn generate_applications_xlsx(applications: &[Application]) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Applications")?;
        let last_col = (XLSX_COLUMNS.len() - 1) as u16;

        let title = format!(
            "Candidate Applications ({}, exported {})",
            applications.len(),
            time::now().format("%Y-%m-%d")
        );
        sheet.merge_range(0, 0, 0, last_col, &title, &banner(HEADER_BG).set_font_size(14))?;

        let header = banner(HEADER_BG);
        for (col, (name, width)) in XLSX_COLUMNS.iter().enumerate() {
            sheet.set_column_width(col as u16, *width)?;
            sheet.write_string_with_format(HEADER_ROW, col as u16, *name, &header)?;
        }

        for (idx, app) in applications.iter().enumerate() {
            let row = HEADER_ROW + 1 + idx as u32;
            let text = cell(if idx % 2 == 0 { STRIPE_BG } else { Color::White });
            let centered = text.clone().set_align(FormatAlign::Center);

            sheet.write_number_with_format(row, 0, (idx + 1) as f64, &centered)?;
            sheet.write_string_with_format(row, 1, app.candidate_name.as_deref().unwrap_or("-"), &text)?;
            sheet.write_string_with_format(row, 2, app.candidate_email.as_deref().unwrap_or("-"), &text)?;
            sheet.write_string_with_format(row, 3, &app.job_title, &text)?;
            sheet.write_string_with_format(row, 4, time::format_date(app.applied_at), &centered)?;
            sheet.write_string_with_format(row, 5, time::format_date(app.updated_at), &centered)?;
            sheet.write_string_with_format(
                row,
                6,
                app.status.label(),
                &banner(badge_color(app.status.badge())),
            )?;
            sheet.write_string_with_format(row, 7, if app.has_cv() { "Yes" } else { "No" }, &centered)?;
        }

        let counts = StatusCounts::from_applications(applications);
        let summary = ApplicationStatus::ALL
            .iter()
            .map(|s| format!("{}: {}", s.label(), counts.get(*s)))
            .collect::<Vec<_>>()
            .join(" | ");
        let last_data_row = HEADER_ROW + applications.len() as u32;
        let summary_row = last_data_row + 2;
        sheet.merge_range(
            summary_row,
            0,
            summary_row,
            last_col,
            &format!("Total: {} | {}", applications.len(), summary),
            &cell(SUMMARY_BG).set_bold().set_align(FormatAlign::Center),
        )?;

        sheet.set_freeze_panes(HEADER_ROW + 1, 0)?;
        sheet.autofilter(HEADER_ROW, 0, last_data_row, last_col)?;

        Ok(workbook.save_to_buffer()?)
    }

    /// CSV of the candidate's own applications, one row per application.
    pub fn generate_applications_csv(applications: &[Application]) -> Result<Vec<u8>> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADERS)?;
        for app in applications {
            let applied = app
                .applied_at
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            writer.write_record([
                app.job_title.as_str(),
                app.company.as_deref().unwrap_or(""),
                app.status.as_str(),
                applied.as_str(),
                app.id.as_str(),
            ])?;
        }
        writer
            .into_inner()
            .map_err(|e| Error::Internal(format!("Failed to flush CSV: {}", e)))
    }

    /// `applications_<date>.csv`
    pub fn csv_file_name() -> String {
        format!("applications_{}.csv", time::now().format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::application_dto::RawApplication;
    use serde_json::json;

    fn apps() -> Vec<Application> {
        let raw: Vec<RawApplication> = serde_json::from_value(json!([
            {"application_id": 1, "job_title": "Rust Engineer", "company": "Acme, Inc.",
             "status": "accepted", "applied_at": "2024-02-10T09:00:00Z"},
            {"application_id": 2, "job_title": "Designer", "status": "pending"}
        ]))
        .unwrap();
        raw.into_iter().map(Application::from).collect()
    }

    #[test]
    fn csv_has_fixed_header_and_quotes_commas() {
        let bytes = ExportService::generate_applications_csv(&apps()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Job Title,Company,Status,Applied Date,Application ID"));
        assert_eq!(lines.next(), Some("Rust Engineer,\"Acme, Inc.\",accepted,2024-02-10,1"));
        assert_eq!(lines.next(), Some("Designer,,pending,,2"));
    }

    #[test]
    fn xlsx_is_a_zip_container() {
        let bytes = ExportService::generate_applications_xlsx(&apps()).unwrap();
        assert!(bytes.starts_with(b"PK"));
        let empty = ExportService::generate_applications_xlsx(&[]).unwrap();
        assert!(!empty.is_empty());
    }
}
