//! Prompt construction and model selection for every AI operation.
//!
//! Pure string building: nothing here touches state or the network, so each
//! builder is tested by inspecting the [`GenerateRequest`] it returns.

#[cfg(test)]
#[path = "prompts_test.rs"]
mod prompts_test;

use super::attachment::{Attachment, AttachmentKind};
use super::generator::{GenerateRequest, ModelTier, Part};
use crate::state::settings::{Framework, GenerationSettings};

/// Design directions for the two variations appended to a session.
pub const VARIATION_DIRECTIONS: [&str; 2] = [
    "Modern Minimalist (Clean, Airy, Inter font, Soft Shadows)",
    "Futuristic Cyberpunk (Dark, Neon Accents, Mono font, Glassmorphism)",
];

/// Rotating examples shown in the empty prompt box.
pub const PROMPT_SUGGESTIONS: [&str; 8] = [
    "SaaS Analytics Dashboard with MRR & Churn charts",
    "E-commerce admin panel with order table and revenue KPIs",
    "CRM pipeline board with deal stages and owner avatars",
    "Server monitoring console with CPU, memory and alert feed",
    "Fintech portfolio overview with asset allocation donut",
    "Healthcare clinic dashboard with appointments and patient stats",
    "Marketing campaign tracker with funnel and channel breakdown",
    "Logistics fleet dashboard with live shipment status map",
];

const RAW_HTML_ONLY: &str = "Return ONLY the complete, standalone raw HTML document.";

// =============================================================================
// ENHANCEMENTS
// =============================================================================

/// Named transformations offered by the enhance panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhanceKind {
    EnhanceCode,
    Dummy,
    FilePopulate,
    Persona,
    A11y,
    Responsive,
    Tailwind,
    Format,
    Charts,
}

impl EnhanceKind {
    pub const ALL: [Self; 9] = [
        Self::EnhanceCode,
        Self::Dummy,
        Self::FilePopulate,
        Self::Persona,
        Self::A11y,
        Self::Responsive,
        Self::Tailwind,
        Self::Format,
        Self::Charts,
    ];

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::EnhanceCode => "enhance-code",
            Self::Dummy => "dummy",
            Self::FilePopulate => "file-populate",
            Self::Persona => "persona",
            Self::A11y => "a11y",
            Self::Responsive => "responsive",
            Self::Tailwind => "tailwind",
            Self::Format => "format",
            Self::Charts => "charts",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::EnhanceCode => "Deep Enhance Code",
            Self::Dummy => "Smart Dummy Data",
            Self::FilePopulate => "File Populate",
            Self::Persona => "Persona & Identity",
            Self::A11y => "Fix Accessibility",
            Self::Responsive => "Mobile Optimization",
            Self::Tailwind => "Utility Refactor",
            Self::Format => "Prettify",
            Self::Charts => "Interactive Charts",
        }
    }

    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::EnhanceCode => "Audit structure and interactivity, then polish the result.",
            Self::Dummy => "Inject realistic names, descriptions and figures from your domain.",
            Self::FilePopulate => "Upload a txt, pdf, csv, json or md file and inject its data.",
            Self::Persona => "Add user personas, portraits and a coherent brand identity.",
            Self::A11y => "Fix ARIA labels, contrast and semantic tags for WCAG.",
            Self::Responsive => "Make the layout work on mobile, tablet and desktop.",
            Self::Tailwind => "Rewrite custom CSS as Tailwind utility classes.",
            Self::Format => "Format and clean the code for readability.",
            Self::Charts => "Turn data-heavy areas into live Chart.js visualizations.",
        }
    }

    /// Panel section the option is listed under.
    #[must_use]
    pub fn section(self) -> &'static str {
        match self {
            Self::EnhanceCode | Self::Dummy => "AI Engineering Core",
            Self::FilePopulate | Self::Persona => "Data & Content",
            Self::A11y | Self::Responsive | Self::Tailwind | Self::Format => "Technical Refinement",
            Self::Charts => "Visual Intelligence",
        }
    }

    /// Deep rewrites run on the pro model, cosmetic ones on flash.
    #[must_use]
    pub fn model(self) -> ModelTier {
        match self {
            Self::Dummy | Self::Format => ModelTier::Flash,
            _ => ModelTier::Pro,
        }
    }

    fn instructions(self) -> &'static str {
        match self {
            Self::EnhanceCode => {
                "You are a principal frontend engineer performing a deep code enhancement.
1. Optimize layout logic and CSS.
2. Add Chart.js visualizations where data warrants them.
3. Refine spacing, typography and visual polish.
4. Improve code structure and comments."
            }
            Self::Dummy => {
                "Inject realistic business KPIs and at least 10 rows of varied table data. \
Numbers, names and descriptions must fit the dashboard's topic and read like live analytics."
            }
            Self::FilePopulate => {
                "You are a data hydration specialist. Read the attached document and extract its metrics, \
table rows, names and trends. Replace every placeholder string, lorem ipsum and mock number in the dashboard \
with that data, fill tables with the real rows and update chart labels and datasets. Keep the existing visual \
style, classes and structure."
            }
            Self::Persona => {
                "You are a branding and UX content strategist.
1. Invent a professional company name and brand.
2. Add realistic, diverse user names and roles.
3. Use Unsplash portrait URLs for avatars.
4. Replace placeholder copy with domain-accurate text."
            }
            Self::A11y => {
                "You are an accessibility engineer. Audit and fix this dashboard for WCAG:
1. Improve ARIA labels and roles.
2. Ensure sufficient color contrast.
3. Use semantic elements (header, main, nav, section)."
            }
            Self::Responsive => {
                "You are a responsive design expert. Make this dashboard work on mobile, tablet and desktop:
1. Stack grids and flex containers correctly.
2. Adjust font sizes and spacing for small screens.
3. Make navigation touch-friendly and collapse sidebars.
4. Add media queries or fluid units where needed."
            }
            Self::Tailwind => {
                "You are a senior frontend engineer. Rewrite all custom CSS as Tailwind utility classes:
1. Move every rule from <style> blocks onto elements as utilities.
2. Remove all <style> blocks.
3. Add <script src=\"https://cdn.tailwindcss.com\"></script> to the head if missing.
4. Use arbitrary values such as bg-[#123456] to keep exact colors."
            }
            Self::Format => "Prettify and format the code for readability without changing behavior.",
            Self::Charts => {
                "You are a data visualization engineer. Find data-heavy areas (tables, lists, numeric grids) \
and add Chart.js charts for them:
1. Add <script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script> to the head.
2. Insert <canvas> elements and a <script> that renders them from the page's data.
3. Keep charts responsive and on the dashboard's color theme."
            }
        }
    }
}

// =============================================================================
// SESSION PROMPTS
// =============================================================================

/// Prompt text stored on the session, marking attachment-driven requests.
#[must_use]
pub fn session_prompt(prompt: &str, attachment: Option<&Attachment>) -> String {
    match attachment {
        Some(a) if a.kind == AttachmentKind::Image => format!("Vision Clone + \"{prompt}\""),
        Some(a) => format!("Data Viz ({}) + \"{prompt}\"", a.name),
        None => prompt.to_owned(),
    }
}

/// One-shot request for three concept names.
#[must_use]
pub fn style_names_request(prompt: &str) -> GenerateRequest {
    GenerateRequest::text(
        ModelTier::Flash,
        format!("Generate 3 distinct UI concept names for: \"{prompt}\". JSON array of strings only."),
    )
}

/// Streaming request for one candidate of a fresh generation.
#[must_use]
pub fn generation_request(
    prompt: &str,
    style: &str,
    settings: &GenerationSettings,
    attachment: Option<&Attachment>,
) -> GenerateRequest {
    let context = generation_context(settings);
    match attachment {
        Some(file) if file.kind == AttachmentKind::Image => {
            let text = format!(
                "You are a senior frontend engineer.
TASK: Clone the layout and visual style of the attached image as closely as possible.
DESCRIPTION: \"{prompt}\"
STYLE CONCEPT: \"{style}\", merged with the image's layout.
{context}
REQUIREMENTS:
- Match the image's spacing, colors and typography.
- Recreate its components (sidebar, charts, tables, cards).
- Use placeholder data that fits the image.
- Keep the markup responsive.
{RAW_HTML_ONLY}"
            );
            GenerateRequest { model: ModelTier::Pro, parts: vec![file.inline_part(), Part::Text(text)] }
        }
        Some(file) => {
            let text = format!(
                "You are a senior frontend engineer.
TASK: Build a dashboard that visualizes the attached document ({name}).
DESCRIPTION: \"{prompt}\"
STYLE CONCEPT: \"{style}\"
{context}
REQUIREMENTS:
- Use the document's real metrics, rows and labels instead of invented data.
- Pick charts and tables that suit the data.
{RAW_HTML_ONLY}",
                name = file.name,
            );
            GenerateRequest { model: ModelTier::Pro, parts: vec![file.inline_part(), Part::Text(text)] }
        }
        None => GenerateRequest::text(
            ModelTier::Flash,
            format!(
                "You are an expert frontend developer. Create a polished, high-fidelity dashboard for: \"{prompt}\".
STYLE CONCEPT: {style}
{context}
Include:
- Sidebar and top navigation
- KPI cards with icons
- A professional data table
- Realistic metrics
{RAW_HTML_ONLY}"
            ),
        ),
    }
}

/// Streaming request for a chat-style refinement of existing markup.
#[must_use]
pub fn iteration_request(instruction: &str, html: &str) -> GenerateRequest {
    GenerateRequest::text(
        ModelTier::Pro,
        format!(
            "You are a senior frontend engineer. Modify the dashboard below.
EXISTING CODE:
{html}
USER REQUEST: \"{instruction}\"
Apply the change while keeping the current design language, layout and component hierarchy. {RAW_HTML_ONLY}"
        ),
    )
}

/// One-shot request for an enhancement. `FilePopulate` without a file
/// degrades to a general polish pass.
#[must_use]
pub fn enhancement_request(kind: EnhanceKind, html: &str, attachment: Option<&Attachment>) -> GenerateRequest {
    match (kind, attachment) {
        (EnhanceKind::FilePopulate, Some(file)) => GenerateRequest {
            model: kind.model(),
            parts: vec![
                file.inline_part(),
                Part::Text(format!("Source document: {}\n{}\n{RAW_HTML_ONLY}", file.name, kind.instructions())),
                Part::Text(format!("EXISTING CODE TO HYDRATE:\n{html}")),
            ],
        },
        (EnhanceKind::FilePopulate, None) => GenerateRequest::text(
            kind.model(),
            format!("Improve the code quality and visual polish of this dashboard. {RAW_HTML_ONLY}\n\nEXISTING CODE:\n{html}"),
        ),
        _ => GenerateRequest::text(
            kind.model(),
            format!("{}\n{RAW_HTML_ONLY}\n\nEXISTING CODE:\n{html}", kind.instructions()),
        ),
    }
}

/// Streaming request for one design variation of `html`.
#[must_use]
pub fn variation_request(direction: &str, session_prompt: &str, html: &str) -> GenerateRequest {
    GenerateRequest::text(
        ModelTier::Pro,
        format!(
            "You are a principal UI engineer. Create a distinct variation of the dashboard below.
DESIGN DIRECTION: {direction}
1. KEEP all data points, charts and structural hierarchy.
2. CHANGE the visual language: typography, spacing, radius, shadows, palette.
3. Keep WCAG AA contrast.
CONTEXT: \"{session_prompt}\"
BASE CODE:
{html}
{RAW_HTML_ONLY}"
        ),
    )
}

fn generation_context(settings: &GenerationSettings) -> String {
    let framework = match settings.framework {
        Framework::Vanilla => "Using vanilla HTML/CSS.".to_owned(),
        other => format!("Using {} for component patterns.", other.label()),
    };
    let data = settings.data_context.trim();
    let data = if data.is_empty() {
        "Use realistic industry-standard dummy data.".to_owned()
    } else {
        format!("Use this data context: \"{data}\".")
    };
    let mut out = format!("FRAMEWORK: {framework}\nDATA: {data}");
    let directives = settings.enhancement_directives();
    if !directives.is_empty() {
        out.push_str("\nMandatory AI Enhancements:");
        for directive in directives {
            out.push_str("\n- ");
            out.push_str(directive);
        }
    }
    out
}
