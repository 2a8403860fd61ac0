//! Domain input and interactive confirmation.

use std::io::{self, BufRead, Read, Write};
use std::path::Path;

use zone_purge_core::parse_domains;

/// Whether stdin is the domain source: no positional domains and no file,
/// or a lone `-`.
pub fn reads_stdin(args: &[String], file: Option<&Path>) -> bool {
    match args {
        [] => file.is_none(),
        [only] => only == "-",
        _ => false,
    }
}

/// Gather domains from the file, the positional arguments and, when
/// [`reads_stdin`] says so, from `stdin`; then normalize them.
pub fn collect_domains(
    args: &[String],
    file: Option<&Path>,
    mut stdin: impl Read,
) -> io::Result<Vec<String>> {
    let mut text = String::new();

    if let Some(path) = file {
        text.push_str(&std::fs::read_to_string(path)?);
        text.push('\n');
    }
    if reads_stdin(args, file) {
        stdin.read_to_string(&mut text)?;
    } else {
        for arg in args.iter().filter(|a| *a != "-") {
            text.push_str(arg);
            text.push('\n');
        }
    }

    Ok(parse_domains(&text))
}

/// List the batch and ask for an explicit `yes`.
pub fn confirm(domains: &[String], reader: &mut impl BufRead, writer: &mut impl Write) -> io::Result<bool> {
    writeln!(writer, "The following zones will be deleted:")?;
    for domain in domains {
        writeln!(writer, "  {domain}")?;
    }
    write!(
        writer,
        "This is irreversible. Delete {} zone(s)? [y/N] ",
        domains.len()
    )?;
    writer.flush()?;

    let mut answer = String::new();
    reader.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
