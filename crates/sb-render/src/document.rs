use std::fs;
use std::io::{self, Write};
use std::path::Path;

use sb_core::ScriptBookError;

/// Rendered material for one script's section of the document.
#[derive(Debug, Clone)]
pub struct Section {
    /// Hashed on-disk path, shown next to the storage id in the header.
    pub located: String,
    pub table: String,
}

const DOCUMENT_STYLE: &str = r#"<style>
    html {
        font-family: 'Sarasa Mono SC', 'Noto Sans Mono CJK SC', monospace;
    }

    #voplayer {
        top: 1em;
        right: 1em;
        position: fixed;
    }

    table {
        margin: 0.25em 0.5em;
        border-collapse: collapse;
    }
    html > table {
        max-width: 75%;
    }

    td {
        padding: 0;
        width: fit-content;
        vertical-align: top;
        border: 1px solid black;
    }

    .cond {
        font-weight: bold;
        color: lightskyblue;
        background-color: black;
    }

    .dia {
        color: #00896C;
        margin-left: 1em;
        font-weight: bold;
    }

    .exp {
        font-weight: bold;
        color: greenyellow;
        background-color: black;
    }

    .jump {
        text-decoration: none;
    }

    .jump,
    .jump:active,
    .jump:visited {
        color: #3f2e32;
        font-weight: bold;
    }

    .label {
        color: #51A8DD;
        font-weight: bold;
    }

    .vo {
        background-color: #F0F0F0;
        padding-left: 1em;
    }

    .vo:hover {
        cursor: pointer;
    }

    td:nth-of-type(2) {
        padding: 0 0.2em;
        text-align: center;
        align-items: center;
        min-width: 2em;
    }

    a[href]::before {
        content: "-> ";
    }
</style>"#;

const PLAYER_SCRIPT: &str = r#"<script>
        let ao = document.getElementById('voplayer');
        function vo(src) {
            ao.src = src;
            ao.style.display = 'block';
            ao.play();
        }
    </script>
</body>

</html>
"#;

/// Streams the full transcript document: shell, one section per storage in
/// caller order, then the playback wiring. `section` is called once per
/// storage and any error it returns aborts the write.
pub fn write_document<W, F>(
    writer: &mut W,
    title: &str,
    storages: &[String],
    mut section: F,
) -> Result<(), ScriptBookError>
where
    W: Write,
    F: FnMut(&str) -> Result<Section, ScriptBookError>,
{
    write!(
        writer,
        "<!DOCTYPE html>\n<html>\n<meta charset=\"utf-8\">\n{}\n\n<title>{}</title>\n\n<body>\n    <h1>{}</h1>\n    <audio id=\"voplayer\" controls style=\"display: none;\"></audio>\n",
        DOCUMENT_STYLE, title, title
    )
    .map_err(write_error)?;

    for storage in storages {
        let rendered = section(storage)?;
        write!(
            writer,
            "<div>file: {} ({})</div>\n{}\n",
            storage, rendered.located, rendered.table
        )
        .map_err(write_error)?;
    }

    write!(writer, "    {}", PLAYER_SCRIPT).map_err(write_error)?;
    Ok(())
}

/// `write_document` against a freshly created file, buffered.
pub fn write_document_file<F>(
    path: &Path,
    title: &str,
    storages: &[String],
    section: F,
) -> Result<(), ScriptBookError>
where
    F: FnMut(&str) -> Result<Section, ScriptBookError>,
{
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent).map_err(|error| {
            ScriptBookError::new(
                "DOCUMENT_WRITE",
                format!("Failed to create \"{}\": {}", parent.display(), error),
            )
        })?;
    }

    let file = fs::File::create(path).map_err(|error| {
        ScriptBookError::new(
            "DOCUMENT_WRITE",
            format!("Failed to create \"{}\": {}", path.display(), error),
        )
    })?;

    let mut writer = io::BufWriter::new(file);
    write_document(&mut writer, title, storages, section)?;
    writer.flush().map_err(write_error)
}

fn write_error(error: io::Error) -> ScriptBookError {
    ScriptBookError::new("DOCUMENT_WRITE", error.to_string())
}
