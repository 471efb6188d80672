//! Print the OpenAPI document as YAML, or as JSON with `--json`.

use std::io::{self, Write};

use contacts::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let doc = ApiDoc::openapi();
    let rendered = if std::env::args().skip(1).any(|arg| arg == "--json") {
        doc.to_pretty_json().map_err(io::Error::other)?
    } else {
        doc.to_yaml().map_err(io::Error::other)?
    };
    writeln!(io::stdout().lock(), "{rendered}")
}
