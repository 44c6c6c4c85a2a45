//! Output formatters: console, JSON, Markdown, HTML and PDF

use crate::config::OutputFormat;
use crate::error::{Result, ResumeEvaluatorError};
use crate::output::report::{ResumeReport, ScoreRating};
use askama::Template;
use colored::{Color, Colorize};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};
use std::path::Path;

/// Trait for rendering a report as text
pub trait OutputFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String>;
}

/// Terminal formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Paginated A4 document built with printpdf
pub struct PdfFormatter {
    font_size: f32,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
    pdf_formatter: PdfFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Evaluation Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
            margin-left: 10px;
        }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 {
            color: #007acc;
            border-bottom: 2px solid #e9ecef;
            padding-bottom: 10px;
        }
        table { border-collapse: collapse; width: 100%; }
        th, td { text-align: left; padding: 8px; border-bottom: 1px solid #e9ecef; }
        .present { color: #28a745; }
        .absent { color: #dc3545; }
        .keyword {
            display: inline-block;
            padding: 2px 10px;
            margin: 2px;
            border-radius: 12px;
            background: #e9ecef;
        }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Evaluation Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Summary</h2>
            <h3>
                Total Score: {{ total_score }}
                <span class="score-badge {{ score_class }}">{{ score_label }}</span>
            </h3>
            <p><strong>Verdict:</strong> {{ verdict }}</p>
            <table>
                <tr><th>Component</th><th>Score</th><th>Weight</th></tr>
                {% for row in score_rows %}
                <tr>
                    <td>{{ row.name }}</td><td>{{ row.score }}</td><td>{{ row.weight }}</td>
                </tr>
                {% endfor %}
            </table>
            <p>Grammar issues: {{ grammar_issues }} in {{ word_count }} words</p>
        </div>

        <div class="section">
            <h2>Resume Structure</h2>
            <ul>
            {% for section in sections %}
                {% if section.present %}
                <li class="present">{{ section.name }}: found</li>
                {% else %}
                <li class="absent">{{ section.name }}: missing</li>
                {% endif %}
            {% endfor %}
            </ul>
            <ul>
            {% for tip in structure_tips %}
                <li>{{ tip }}</li>
            {% endfor %}
            </ul>
        </div>

        {% if job_description_provided %}
        <div class="section">
            <h2>Skill Match: {{ match_score }}%</h2>
            <h3>Matched Skills</h3>
            <p>
            {% for skill in matched %}<span class="keyword">{{ skill }}</span>{% endfor %}
            </p>
            <h3>Missing Skills</h3>
            <p>
            {% for skill in missing %}<span class="keyword">{{ skill }}</span>{% endfor %}
            </p>
            <h3>Listed Skills: {{ skill_list_score }}% of {{ skill_list_job_count }}</h3>
            <p>
            {% for skill in skill_list_matched %}
                <span class="keyword">{{ skill }}</span>
            {% endfor %}
            </p>
        </div>
        {% endif %}

        <div class="section">
            <h2>Career Suggestions</h2>
            <ul>
            {% for suggestion in suggestions %}
                <li>{{ suggestion }}</li>
            {% endfor %}
            </ul>
        </div>

        <div class="metadata">
            <p><strong>Generated by Resume Evaluator v{{ version }}</strong></p>
            <p>
                <strong>Resume:</strong> {{ resume_file }} |
                <strong>Job:</strong> {{ job_file }}
            </p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    total_score: String,
    score_class: String,
    score_label: String,
    verdict: String,
    score_rows: Vec<ScoreRow>,
    grammar_issues: usize,
    word_count: usize,
    sections: Vec<SectionRow>,
    structure_tips: Vec<String>,
    job_description_provided: bool,
    match_score: String,
    matched: Vec<String>,
    missing: Vec<String>,
    skill_list_score: String,
    skill_list_job_count: usize,
    skill_list_matched: Vec<String>,
    suggestions: Vec<String>,
    version: String,
    resume_file: String,
    job_file: String,
}

struct ScoreRow {
    name: &'static str,
    score: String,
    weight: String,
}

struct SectionRow {
    name: String,
    present: bool,
}

/// Component name, score and relative weight as a percentage of the total.
fn score_breakdown(report: &ResumeReport) -> Vec<(&'static str, f64, f64)> {
    let w = &report.weights;
    let total = w.total_weight();
    let share = |weight: f64| if total > 0.0 { weight / total * 100.0 } else { 0.0 };
    let analysis = &report.analysis;

    vec![
        ("Grammar", analysis.grammar.score, share(w.grammar_weight)),
        ("Readability", analysis.readability_score, share(w.readability_weight)),
        ("Structure", analysis.structure.score, share(w.structure_weight)),
        ("Skill Match", analysis.skill_match.match_score, share(w.skill_weight)),
    ]
}

fn join_keywords<'a>(keywords: impl IntoIterator<Item = &'a String>) -> String {
    keywords.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

/// Markdown inline-code list: `a`, `b`
fn code_list<'a>(keywords: impl IntoIterator<Item = &'a String>) -> String {
    keywords
        .into_iter()
        .map(|k| format!("`{}`", k))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, rating: ScoreRating) -> String {
        let color = match rating {
            ScoreRating::Excellent => Color::Green,
            ScoreRating::Good => Color::BrightGreen,
            ScoreRating::Fair => Color::Yellow,
            ScoreRating::Poor => Color::Red,
        };
        let badge = rating.label().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME EVALUATION", 1));
        output.push_str(&format!(
            "Resume: {} | Job: {}\n",
            report.resume_name(),
            report.job_name()
        ));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.generated_at_display(),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Total Score: {:.2} {}\n",
            report.summary.total_score,
            self.format_score_badge(report.summary.rating)
        ));
        output.push_str(&format!(
            "Verdict: {}\n",
            self.colorize(&report.summary.verdict, Color::Cyan)
        ));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (name, score, weight) in score_breakdown(report) {
            output.push_str(&format!(
                "  {:<12} {:>7.2} (weight: {:.1}%)\n",
                name, score, weight
            ));
        }
        output.push_str(&format!(
            "  Grammar issues: {} in {} words\n",
            analysis.grammar.issues, analysis.grammar.word_count
        ));

        output.push_str(&self.format_header("Resume Structure", 2));
        for section in &analysis.structure.sections {
            let mark = if section.present {
                self.colorize("✓", Color::Green)
            } else {
                self.colorize("✗", Color::Red)
            };
            output.push_str(&format!("  {} {}\n", mark, section.name));
        }
        for tip in &analysis.structure_tips {
            output.push_str(&format!("  • {}\n", self.colorize(tip, Color::Yellow)));
        }

        if analysis.job_description_provided {
            let skills = &analysis.skill_match;
            output.push_str(&self.format_header("Skill Match", 2));
            output.push_str(&format!(
                "Match Score: {:.2}% ({} of {} job keywords)\n",
                skills.match_score,
                skills.matched.len(),
                skills.job_keyword_count()
            ));
            if !skills.matched.is_empty() {
                output.push_str(&format!(
                    "  Matched: {}\n",
                    self.colorize(&join_keywords(&skills.matched), Color::Green)
                ));
            }
            if !skills.missing.is_empty() {
                output.push_str(&format!(
                    "  Missing: {}\n",
                    self.colorize(&join_keywords(&skills.missing), Color::Red)
                ));
            }
            let listed = &analysis.skill_list_match;
            output.push_str(&format!(
                "  Listed skills: {:.2}% ({} of {})",
                listed.score,
                listed.matched.len(),
                listed.job_skill_count
            ));
            if !listed.matched.is_empty() {
                output.push_str(&format!(": {}", join_keywords(&listed.matched)));
            }
            output.push('\n');
        }

        output.push_str(&self.format_header("Career Suggestions", 2));
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }

        if self.detailed {
            output.push_str(&self.format_header("Detailed Analysis", 2));
            output.push_str(&format!(
                "Raw readability (Flesch): {:.2}\n",
                analysis.readability_score
            ));
            output.push_str(&format!(
                "Sections found: {}/{}\n",
                analysis.structure.found_count(),
                analysis.structure.sections.len()
            ));
            let missing_sections: Vec<&str> = analysis.structure.missing().collect();
            if !missing_sections.is_empty() {
                output.push_str(&format!(
                    "Missing sections: {}\n",
                    missing_sections.join(", ")
                ));
            }
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Evaluator v{}\n",
            self.colorize("ℹ", Color::Blue),
            report.metadata.evaluator_version
        ));

        Ok(output)
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &ResumeReport) -> HtmlTemplate {
        let analysis = &report.analysis;
        let score_class = match report.summary.rating {
            ScoreRating::Excellent => "score-excellent",
            ScoreRating::Good => "score-good",
            ScoreRating::Fair => "score-fair",
            ScoreRating::Poor => "score-poor",
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.generated_at_display(),
            processing_time: report.metadata.processing_time_ms,
            total_score: format!("{:.2}", report.summary.total_score),
            score_class: score_class.to_string(),
            score_label: report.summary.rating.label().to_string(),
            verdict: report.summary.verdict.clone(),
            score_rows: score_breakdown(report)
                .into_iter()
                .map(|(name, score, weight)| ScoreRow {
                    name,
                    score: format!("{:.2}", score),
                    weight: format!("{:.1}%", weight),
                })
                .collect(),
            grammar_issues: analysis.grammar.issues,
            word_count: analysis.grammar.word_count,
            sections: analysis
                .structure
                .sections
                .iter()
                .map(|s| SectionRow {
                    name: s.name.clone(),
                    present: s.present,
                })
                .collect(),
            structure_tips: analysis.structure_tips.clone(),
            job_description_provided: analysis.job_description_provided,
            match_score: format!("{:.2}", analysis.skill_match.match_score),
            matched: analysis.skill_match.matched.iter().cloned().collect(),
            missing: analysis.skill_match.missing.iter().cloned().collect(),
            skill_list_score: format!("{:.2}", analysis.skill_list_match.score),
            skill_list_job_count: analysis.skill_list_match.job_skill_count,
            skill_list_matched: analysis.skill_list_match.matched.clone(),
            suggestions: analysis.suggestions.clone(),
            version: report.metadata.evaluator_version.clone(),
            resume_file: report.resume_name(),
            job_file: report.job_name(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeEvaluatorError::OutputFormatting(e.to_string()))
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(rating: ScoreRating) -> &'static str {
        match rating {
            ScoreRating::Excellent => "🟢 Excellent",
            ScoreRating::Good => "🟡 Good",
            ScoreRating::Fair => "🟠 Fair",
            ScoreRating::Poor => "🔴 Needs Work",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &ResumeReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str("# Resume Evaluation Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.generated_at_display(),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                report.resume_name(),
                report.job_name()
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Total Score:** {:.2} {}\n\n",
            report.summary.total_score,
            Self::markdown_score_badge(report.summary.rating)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.summary.verdict));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        for (name, score, weight) in score_breakdown(report) {
            output.push_str(&format!("| {} | {:.2} | {:.1}% |\n", name, score, weight));
        }
        output.push_str(&format!(
            "\nGrammar issues: {} in {} words\n\n",
            analysis.grammar.issues, analysis.grammar.word_count
        ));

        output.push_str("## Resume Structure\n\n");
        for section in &analysis.structure.sections {
            let mark = if section.present { "x" } else { " " };
            output.push_str(&format!("- [{}] {}\n", mark, section.name));
        }
        output.push('\n');
        for tip in &analysis.structure_tips {
            output.push_str(&format!("> {}\n", tip));
        }
        output.push('\n');

        if analysis.job_description_provided {
            let skills = &analysis.skill_match;
            output.push_str(&format!("## Skill Match: {:.2}%\n\n", skills.match_score));
            if !skills.matched.is_empty() {
                output.push_str(&format!("**Matched:** {}\n\n", code_list(&skills.matched)));
            }
            if !skills.missing.is_empty() {
                output.push_str(&format!("**Missing:** {}\n\n", code_list(&skills.missing)));
            }
            let listed = &analysis.skill_list_match;
            output.push_str(&format!(
                "**Listed skills:** {:.2}% of {}",
                listed.score, listed.job_skill_count
            ));
            if !listed.matched.is_empty() {
                output.push_str(&format!(" ({})", code_list(&listed.matched)));
            }
            output.push_str("\n\n");
        }

        output.push_str("## Career Suggestions\n\n");
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
        output.push('\n');

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by Resume Evaluator v{}*\n",
                report.metadata.evaluator_version
            ));
        }

        Ok(output)
    }
}

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_FACTOR: f32 = 0.5;
/// Characters per line at 11pt Helvetica across the text column.
const WRAP_WIDTH: usize = 90;

/// One line of PDF content with its size.
struct PdfLine {
    text: String,
    size: f32,
}

impl PdfFormatter {
    pub fn new(font_size: f32) -> Self {
        Self { font_size }
    }

    /// Flatten the report into wrapped lines, headings larger than body text.
    fn layout(&self, report: &ResumeReport) -> Vec<PdfLine> {
        let analysis = &report.analysis;
        let heading = self.font_size + 4.0;
        let mut lines = Vec::new();
        let mut push = |text: String, size: f32| {
            for wrapped in wrap_text(&pdf_safe(&text), WRAP_WIDTH) {
                lines.push(PdfLine { text: wrapped, size });
            }
        };

        push("RESUME EVALUATION REPORT".to_string(), heading + 2.0);
        push(format!("Generated: {}", report.generated_at_display()), self.font_size);
        push(
            format!("Resume: {} | Job: {}", report.resume_name(), report.job_name()),
            self.font_size,
        );
        push(String::new(), self.font_size);

        push("SUMMARY".to_string(), heading);
        push(
            format!(
                "Total Score: {:.2} [{}]",
                report.summary.total_score,
                report.summary.rating.label()
            ),
            self.font_size,
        );
        push(format!("Verdict: {}", report.summary.verdict), self.font_size);
        for (name, score, weight) in score_breakdown(report) {
            push(
                format!("  - {}: {:.2} (weight: {:.1}%)", name, score, weight),
                self.font_size,
            );
        }
        push(
            format!(
                "  Grammar issues: {} in {} words",
                analysis.grammar.issues, analysis.grammar.word_count
            ),
            self.font_size,
        );
        push(String::new(), self.font_size);

        push("RESUME STRUCTURE".to_string(), heading);
        for section in &analysis.structure.sections {
            let state = if section.present { "found" } else { "missing" };
            push(format!("  - {}: {}", section.name, state), self.font_size);
        }
        for tip in &analysis.structure_tips {
            push(format!("  * {}", tip), self.font_size);
        }
        push(String::new(), self.font_size);

        if analysis.job_description_provided {
            let skills = &analysis.skill_match;
            push(format!("SKILL MATCH: {:.2}%", skills.match_score), heading);
            push(format!("Matched: {}", join_keywords(&skills.matched)), self.font_size);
            push(format!("Missing: {}", join_keywords(&skills.missing)), self.font_size);
            let listed = &analysis.skill_list_match;
            push(
                format!(
                    "Listed skills: {:.2}% of {} ({})",
                    listed.score,
                    listed.job_skill_count,
                    join_keywords(&listed.matched)
                ),
                self.font_size,
            );
            push(String::new(), self.font_size);
        }

        push("CAREER SUGGESTIONS".to_string(), heading);
        for (i, suggestion) in analysis.suggestions.iter().enumerate() {
            push(format!("{}. {}", i + 1, suggestion), self.font_size);
        }
        push(String::new(), self.font_size);
        push(
            format!("Generated by Resume Evaluator v{}", report.metadata.evaluator_version),
            self.font_size - 2.0,
        );

        lines
    }

    pub fn render(&self, report: &ResumeReport) -> Result<Vec<u8>> {
        let (doc, page, layer) = PdfDocument::new(
            "Resume Evaluation Report",
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            "Layer 1",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ResumeEvaluatorError::OutputFormatting(e.to_string()))?;

        let mut current: PdfLayerReference = doc.get_page(page).get_layer(layer);
        let mut cursor = PAGE_HEIGHT_MM - MARGIN_MM;

        for line in self.layout(report) {
            let advance = line.size * LINE_HEIGHT_FACTOR;
            if cursor - advance < MARGIN_MM {
                let (next_page, next_layer) =
                    doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                current = doc.get_page(next_page).get_layer(next_layer);
                cursor = PAGE_HEIGHT_MM - MARGIN_MM;
            }
            cursor -= advance;
            if !line.text.is_empty() {
                write_line(&current, &line, cursor, &font);
            }
        }

        doc.save_to_bytes()
            .map_err(|e| ResumeEvaluatorError::OutputFormatting(e.to_string()))
    }
}

fn write_line(layer: &PdfLayerReference, line: &PdfLine, y: f32, font: &IndirectFontRef) {
    layer.use_text(line.text.clone(), line.size, Mm(MARGIN_MM), Mm(y), font);
}

/// Builtin PDF fonts only cover Latin-1; replace anything else.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '•' => '-',
            '✓' | '✗' => '*',
            c if (c as u32) < 0x100 => c,
            _ => '?',
        })
        .collect()
}

/// Greedy word wrap at `width` characters, keeping leading indentation.
/// Empty input yields one empty line.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let indent: String = text.chars().take_while(|c| *c == ' ').collect();
    let continuation = format!("{}  ", indent);
    let mut lines = Vec::new();
    let mut current = indent;
    let mut has_words = false;

    for word in text.split_whitespace() {
        if has_words && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::replace(&mut current, continuation.clone()));
            has_words = false;
        }
        if has_words {
            current.push(' ');
        }
        current.push_str(word);
        has_words = true;
    }

    if has_words || lines.is_empty() {
        lines.push(current);
    }
    lines
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
            pdf_formatter: PdfFormatter::new(11.0),
        }
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
            html_formatter: HtmlFormatter::new(true),
            pdf_formatter: PdfFormatter::new(11.0),
        }
    }

    /// Render `report` in `format`. Text formats are returned as UTF-8 bytes.
    pub fn generate_report(
        &self,
        report: &ResumeReport,
        format: OutputFormat,
    ) -> Result<Vec<u8>> {
        let text = match format {
            OutputFormat::Console => self.console_formatter.format_report(report)?,
            OutputFormat::Json => self.json_formatter.format_report(report)?,
            OutputFormat::Markdown => self.markdown_formatter.format_report(report)?,
            OutputFormat::Html => self.html_formatter.format_report(report)?,
            OutputFormat::Pdf => return self.pdf_formatter.render(report),
        };
        Ok(text.into_bytes())
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report(content: &[u8], file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Pdf => "pdf",
    };

    format!("{}_evaluation{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::output::report::ReportMetadata;
    use crate::processing::analyzer::ResumeAnalyzer;

    const RESUME: &str =
        "Summary\nBackend engineer.\n\nEducation\nBSc\n\nExperience\nJava services at Acme.";
    const JOB_POSTING: &str = "Looking for candidates skilled in Python, SQL, teamwork, and Java.";

    fn report(job: Option<&str>) -> ResumeReport {
        let config = Config::default();
        let analysis = ResumeAnalyzer::from_config(&config).unwrap().analyze(RESUME, job);
        ResumeReport::new(
            analysis,
            config.scoring,
            ReportMetadata::new("/tmp/resume.txt", Some("/tmp/job.txt".to_string()), 12),
        )
    }

    #[test]
    fn test_console_plain_output() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&report(Some(JOB_POSTING)))
            .unwrap();
        assert!(output.contains("RESUME EVALUATION"));
        assert!(output.contains("Resume: resume.txt | Job: job.txt"));
        assert!(output.contains("Matched: java"));
        assert!(output.contains("Missing: python, sql, teamwork"));
        assert!(output.contains("Listed skills: 25.00% (1 of 4): java"));
        assert!(output.contains("Detailed Analysis"));
        assert!(!output.contains("\u{1b}["));
    }

    #[test]
    fn test_console_hides_skills_without_job() {
        let output = ConsoleFormatter::new(false, false).format_report(&report(None)).unwrap();
        assert!(!output.contains("Skill Match"));
        assert!(output.contains("Career Suggestions"));
        assert!(!output.contains("Detailed Analysis"));
    }

    #[test]
    fn test_json_round_trips_scores() {
        let report = report(Some(JOB_POSTING));
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["analysis"]["skill_match"]["match_score"], 25.0);
        assert_eq!(value["analysis"]["skill_match"]["matched"][0], "java");
        assert_eq!(value["summary"]["total_score"], report.summary.total_score);
    }

    #[test]
    fn test_markdown_sections() {
        let output = MarkdownFormatter::new(true)
            .format_report(&report(Some(JOB_POSTING)))
            .unwrap();
        assert!(output.starts_with("# Resume Evaluation Report"));
        assert!(output.contains("| Skill Match | 25.00 | 20.0% |"));
        assert!(output.contains("- [x] summary"));
        assert!(output.contains("- [ ] projects"));
        assert!(output.contains("**Matched:** `java`\n"));
        assert!(output.contains("**Missing:** `python`, `sql`, `teamwork`\n"));
        assert!(output.contains("**Listed skills:** 25.00% of 4 (`java`)"));
    }

    #[test]
    fn test_html_escapes_and_renders() {
        let mut report = report(Some(JOB_POSTING));
        report.analysis.suggestions = vec!["Learn <script> tags".to_string()];
        let html = HtmlFormatter::new(false).format_report(&report).unwrap();
        assert!(html.contains("<title>Resume Evaluation Report</title>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Skill Match: 25.00%"));
        assert!(html.contains("Listed Skills: 25.00% of 4"));
        assert!(!html.contains("<style>"));
    }

    #[test]
    fn test_pdf_bytes() {
        let bytes = ReportGenerator::new()
            .generate_report(&report(Some(JOB_POSTING)), OutputFormat::Pdf)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_paginates_long_reports() {
        let mut long = report(None);
        long.analysis.suggestions = (0..200)
            .map(|i| format!("Suggestion number {}", i))
            .collect();
        let lines = PdfFormatter::new(11.0).layout(&long);
        assert!(lines.len() > 200);
        let bytes = PdfFormatter::new(11.0).render(&long).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
        assert_eq!(wrap_text("short", 10), vec!["short".to_string()]);
        let wrapped = wrap_text("alpha beta gamma delta", 11);
        assert_eq!(wrapped, vec!["alpha beta", "  gamma", "  delta"]);
        assert!(wrap_text("  - indented item", 40)[0].starts_with("  - "));
    }

    #[test]
    fn test_pdf_safe_replaces_wide_chars() {
        assert_eq!(pdf_safe("• café ✓ 日本"), "- café * ??");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(OutputFormat::Markdown, "/cv/jane_resume.pdf", false),
            "jane_resume_evaluation.md"
        );
        assert!(suggest_filename(OutputFormat::Pdf, "cv.txt", true).ends_with(".pdf"));
    }

    #[test]
    fn test_save_report_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("report.json");
        save_report(b"{}", &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"{}");
    }
}
