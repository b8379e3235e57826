// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::{
    error::Error,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use clap::{ArgMatches, Command, ValueHint, arg, value_parser};
use versit::{
    Latin1Codec, VersitDocument, VersitType, VersitWriter, codec_for_label, is_ascii_label,
};

use crate::config::Config;
use crate::input::parse_documents;

#[derive(Debug, Clone)]
pub struct CmdEncode {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub format: Option<VersitType>,
    pub charset: Option<String>,
    pub ascii: bool,
}

impl CmdEncode {
    pub const NAME: &str = "encode";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Encode the documents described in a TOML file")
            .arg(
                arg!(input: <INPUT> "TOML file describing the documents")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                arg!(-o --output [FILE] "Write to FILE instead of standard output")
                    .value_parser(value_parser!(PathBuf))
                    .value_hint(ValueHint::FilePath),
            )
            .arg(
                arg!(-f --format [FORMAT] "Format for documents without their own type")
                    .long_help(
                        "\
Format for documents without their own type: 2.1, 3.0, 4.0 or ical. \
Defaults to the config file, then to 3.0.",
                    )
                    .value_parser(value_parser!(VersitType)),
            )
            .arg(arg!(--charset [LABEL] "Charset of the output, e.g. utf-8, latin1, utf-16"))
            .arg(arg!(--ascii "Restrict the output charset to 7-bit ASCII"))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        Self {
            input: matches
                .get_one::<PathBuf>("input")
                .cloned()
                .unwrap_or_default(),
            output: matches.get_one("output").cloned(),
            format: matches.get_one("format").copied(),
            charset: matches.get_one("charset").cloned(),
            ascii: matches.get_flag("ascii"),
        }
    }

    pub fn run(self, config: &Config) -> Result<(), Box<dyn Error>> {
        tracing::debug!(?self, "encoding documents...");
        let content = fs::read_to_string(&self.input).map_err(|e| {
            format!("Failed to read input file at {}: {}", self.input.display(), e)
        })?;
        let base_dir = self.input.parent().unwrap_or_else(|| Path::new("."));
        let documents = parse_documents(&content, base_dir)?;

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .map_err(|e| format!("Failed to create {}: {}", path.display(), e))?;
                self.encode(&documents, config, BufWriter::new(file))?;
            }
            None => {
                self.encode(&documents, config, io::stdout().lock())?;
            }
        }

        tracing::info!(count = documents.len(), "documents written");
        Ok(())
    }

    /// Writes `documents` to `sink` with the settings of this command and
    /// `config`, returning the sink.
    pub fn encode<W: Write>(
        &self,
        documents: &[VersitDocument],
        config: &Config,
        sink: W,
    ) -> Result<W, Box<dyn Error>> {
        let default_type = match self.format {
            Some(versit_type) => versit_type,
            None => config.versit_type()?.unwrap_or(VersitType::VCard30),
        };
        let charset = self.charset.as_deref().or(config.charset.as_deref());
        let ascii = self.ascii || config.ascii;

        let mut writer = VersitWriter::new(sink)
            .with_default_type(default_type)
            .with_options(config.format_options());
        match charset {
            Some(label) => {
                let codec =
                    codec_for_label(label).ok_or_else(|| format!("Unknown charset: {label}"))?;
                writer = writer
                    .with_codec(codec)
                    .with_ascii_only(ascii || is_ascii_label(label));
            }
            None if ascii => {
                writer = writer
                    .with_codec(Box::new(Latin1Codec))
                    .with_ascii_only(true);
            }
            None => {}
        }

        writer.write_documents(documents)?;
        writer.flush()?;
        Ok(writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;
    use versit::VersitProperty;

    use super::*;

    fn cmd() -> CmdEncode {
        CmdEncode {
            input: PathBuf::from("cards.toml"),
            output: None,
            format: None,
            charset: None,
            ascii: false,
        }
    }

    fn card() -> VersitDocument {
        VersitDocument::new("VCARD").with_property(VersitProperty::text("FN", "Ren\u{e9}e"))
    }

    fn encode(cmd: &CmdEncode, config: &Config) -> String {
        let output = cmd.encode(&[card()], config, Vec::new()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_parse_encode() {
        let cmd = Command::new("test").subcommand(CmdEncode::command());
        let matches = cmd
            .try_get_matches_from(["test", "encode", "in.toml", "-f", "ical"])
            .unwrap();
        let sub_matches = matches.subcommand_matches(CmdEncode::NAME).unwrap();
        let parsed = CmdEncode::from(sub_matches);
        assert_eq!(parsed.input, PathBuf::from("in.toml"));
        assert_eq!(parsed.output, None);
        assert_eq!(parsed.format, Some(VersitType::ICalendar20));
        assert_eq!(parsed.charset, None);
        assert!(!parsed.ascii);
    }

    #[test]
    fn test_invalid_format_is_rejected() {
        let cmd = Command::new("test").subcommand(CmdEncode::command());
        assert!(
            cmd.try_get_matches_from(["test", "encode", "in.toml", "-f", "5.0"])
                .is_err()
        );
    }

    #[test]
    fn test_defaults_to_vcard30() {
        let output = encode(&cmd(), &Config::default());
        assert_eq!(
            output,
            "BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Ren\u{e9}e\r\nEND:VCARD\r\n"
        );
    }

    #[test]
    fn test_flag_overrides_config() {
        let config = Config {
            format: Some("4.0".to_string()),
            ..Config::default()
        };
        assert!(encode(&cmd(), &config).contains("VERSION:4.0\r\n"));

        let cmd = CmdEncode {
            format: Some(VersitType::VCard21),
            ..cmd()
        };
        assert!(encode(&cmd, &config).contains("VERSION:2.1\r\n"));
    }

    #[test]
    fn test_ascii_flag() {
        let cmd = CmdEncode {
            format: Some(VersitType::VCard21),
            charset: Some("utf-8".to_string()),
            ascii: true,
            ..cmd()
        };
        let output = encode(&cmd, &Config::default());
        assert!(output.contains("FN;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:Ren=C3=A9e\r\n"));
    }

    #[test]
    fn test_ascii_charset_label() {
        let config = Config {
            format: Some("2.1".to_string()),
            charset: Some("us-ascii".to_string()),
            ..Config::default()
        };
        assert!(encode(&cmd(), &config).contains("FN;CHARSET=UTF-8;"));
    }

    #[test]
    fn test_latin1_charset_label() {
        let cmd = CmdEncode {
            format: Some(VersitType::VCard21),
            charset: Some("ISO-8859-1".to_string()),
            ..cmd()
        };
        let document = VersitDocument::new("VCARD")
            .with_property(VersitProperty::text("NOTE", "5 \u{20ac}"));
        let output = cmd.encode(&[document], &Config::default(), Vec::new()).unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("NOTE;CHARSET=UTF-8;ENCODING=QUOTED-PRINTABLE:5 =E2=82=AC\r\n"));
    }

    #[test]
    fn test_unknown_charset() {
        let cmd = CmdEncode {
            charset: Some("no-such-charset".to_string()),
            ..cmd()
        };
        let err = cmd.encode(&[card()], &Config::default(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("Unknown charset"));
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("cards.toml");
        let output = temp_dir.path().join("cards.vcf");
        fs::write(
            &input,
            "[[document]]\ncomponent = \"VCARD\"\n[[document.property]]\nname = \"FN\"\nvalue = \"John Doe\"\n",
        )
        .unwrap();

        let cmd = CmdEncode {
            input,
            output: Some(output.clone()),
            format: Some(VersitType::VCard21),
            ..cmd()
        };
        cmd.run(&Config::default()).unwrap();

        assert_eq!(
            fs::read_to_string(output).unwrap(),
            "BEGIN:VCARD\r\nVERSION:2.1\r\nFN:John Doe\r\nEND:VCARD\r\n"
        );
    }
}
