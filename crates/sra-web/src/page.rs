//! Status page served at `/`.

use sra_core::config::AppConfig;

const FEATURES: &[&str] = &[
    "PDF safety report analysis using GPT",
    "Multiple analysis methods (Five Whys, Fishbone, Bowtie, Fault Tree)",
    "Auto-classification for TC/SMS compliance",
    "Local SQLite database with similarity search",
    "Export to PDF and Excel formats",
    "English and French language support",
];

pub fn render_index(config: &AppConfig) -> String {
    let key_status = if config.api_key_configured() {
        "✅ Configured"
    } else {
        "❌ Not configured"
    };
    let features: String = FEATURES
        .iter()
        .map(|f| format!("<li>{f}</li>"))
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{name}</title>
<style>
body {{ font-family: 'Segoe UI', Tahoma, sans-serif; background: #0B1220; color: #E8EEF9; margin: 0; padding: 20px; }}
.container {{ max-width: 960px; margin: 0 auto; background: #111A2B; border-radius: 12px; padding: 30px; }}
h1 {{ color: #4F8FF7; text-align: center; }}
.info-box {{ background: #0E1730; border: 1px solid #233249; border-radius: 8px; padding: 20px; margin: 20px 0; }}
.status {{ color: #18C29C; font-weight: bold; }}
</style>
</head>
<body>
<div class="container">
<h1>🛡️ {name}</h1>
<div class="info-box">
<h3>Status</h3>
<p class="status">✅ Application is running successfully!</p>
<p>Version {version}. The full analyzer is a desktop application; run it locally after <code>sra setup</code>.</p>
</div>
<div class="info-box">
<h3>Features</h3>
<ul>{features}</ul>
</div>
<div class="info-box">
<h3>API Key Status</h3>
<p>OpenAI API Key: {key_status}</p>
</div>
</div>
</body>
</html>
"#,
        name = sra_core::APP_NAME,
        version = sra_core::APP_VERSION,
    )
}
