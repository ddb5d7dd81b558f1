use super::{Brew, BrewError};

const HEADER_MARKER: &str = "==>";
const FEATURED_SECTIONS: [&str; 4] = ["Names", "Description", "Artifacts", "Analytics"];
const EMPTY_BODY: &str = "(empty)";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoSection {
    pub title: String,
    pub lines: Vec<String>,
}

/// `brew info` text split into a leading summary and `==>` sections.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackageInfo {
    pub raw: String,
    pub summary: Vec<String>,
    pub sections: Vec<InfoSection>,
}

/// One titled block in the info popup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InfoBlock<'a> {
    pub title: &'a str,
    pub lines: Vec<&'a str>,
}

#[derive(Debug)]
pub struct InfoMessage {
    pub pkg: String,
    pub result: Result<PackageInfo, BrewError>,
}

pub async fn fetch_info(brew: &Brew, pkg: &str) -> Result<PackageInfo, BrewError> {
    let output = brew.run(&["info", pkg]).await?;
    let fallback = format!("brew info failed for {pkg}");
    output.ensure_success(&fallback)?;
    Ok(parse_info(&output.stdout))
}

pub fn parse_info(raw: &str) -> PackageInfo {
    let mut summary = Vec::new();
    let mut sections: Vec<InfoSection> = Vec::new();
    let mut current: Option<usize> = None;

    for line in raw.lines() {
        if let Some(rest) = line.strip_prefix(HEADER_MARKER) {
            let title = match rest.trim() {
                "" => "Other",
                title => title,
            };
            // Repeated headers share one section.
            let index = match sections.iter().position(|section| section.title == title) {
                Some(index) => index,
                None => {
                    sections.push(InfoSection {
                        title: title.to_string(),
                        lines: Vec::new(),
                    });
                    sections.len() - 1
                }
            };
            current = Some(index);
            continue;
        }

        match current {
            Some(index) => sections[index].lines.push(line.to_string()),
            None if !line.trim().is_empty() => summary.push(line.to_string()),
            None => {}
        }
    }

    PackageInfo {
        raw: raw.to_string(),
        summary,
        sections,
    }
}

impl PackageInfo {
    /// Blocks in display order: summary, `name: version` style headers, the
    /// featured cask sections, then everything else that has content.
    pub fn display_blocks(&self) -> Vec<InfoBlock<'_>> {
        let mut blocks = Vec::new();

        if !self.summary.is_empty() {
            blocks.push(InfoBlock {
                title: "Summary",
                lines: self.summary.iter().map(String::as_str).collect(),
            });
        }

        for section in self.sections.iter().filter(|s| is_header(s)) {
            blocks.push(block_or_placeholder(section));
        }

        for name in FEATURED_SECTIONS {
            if let Some(section) = self.sections.iter().find(|s| s.title == name && !is_header(s)) {
                blocks.push(block_or_placeholder(section));
            }
        }

        for section in self
            .sections
            .iter()
            .filter(|s| !is_header(s) && !is_featured(s))
        {
            let lines = visible_lines(section);
            if !lines.is_empty() {
                blocks.push(InfoBlock {
                    title: &section.title,
                    lines,
                });
            }
        }

        blocks
    }

    /// Total rendered height of the popup body, one blank line between blocks.
    /// Falls back to the raw line count when nothing parsed into a block.
    pub fn display_height(&self) -> usize {
        let blocks = self.display_blocks();
        if blocks.is_empty() {
            return self.raw.lines().count();
        }
        blocks.iter().map(|block| block.lines.len() + 2).sum()
    }
}

fn is_header(section: &InfoSection) -> bool {
    section.title.contains(':')
}

fn is_featured(section: &InfoSection) -> bool {
    FEATURED_SECTIONS.contains(&section.title.as_str())
}

fn visible_lines(section: &InfoSection) -> Vec<&str> {
    section
        .lines
        .iter()
        .map(String::as_str)
        .filter(|line| !line.trim().is_empty())
        .collect()
}

fn block_or_placeholder(section: &InfoSection) -> InfoBlock<'_> {
    let mut lines = visible_lines(section);
    if lines.is_empty() {
        lines.push(EMPTY_BODY);
    }
    InfoBlock {
        title: &section.title,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WGET_INFO: &str = "\
==> wget: stable 1.24.5 (bottled), HEAD
Internet file retriever
https://www.gnu.org/software/wget/
Installed
/opt/homebrew/Cellar/wget/1.24.5 (92 files, 4.5MB) *
==> Dependencies
Required: libidn2, openssl@3
==> Options
--HEAD
\tInstall HEAD version
==> Analytics
install: 95,821 (30 days)
";

    #[test]
    fn formula_info_splits_into_sections() {
        let info = parse_info(WGET_INFO);
        assert!(info.summary.is_empty());
        let titles: Vec<&str> = info.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "wget: stable 1.24.5 (bottled), HEAD",
                "Dependencies",
                "Options",
                "Analytics"
            ]
        );
        assert_eq!(info.sections[1].lines, vec!["Required: libidn2, openssl@3"]);
        assert_eq!(info.raw, WGET_INFO);
    }

    #[test]
    fn leading_lines_form_the_summary() {
        let info = parse_info("Warning: treating wget as a formula\n\n==> wget: stable 1.0\nbody\n");
        assert_eq!(info.summary, vec!["Warning: treating wget as a formula"]);
        assert_eq!(info.sections.len(), 1);
    }

    #[test]
    fn blank_header_is_named_other_and_repeats_merge() {
        let info = parse_info("==>\nfirst\n==> Caveats\nnote\n==>   \nsecond\n");
        assert_eq!(info.sections.len(), 2);
        assert_eq!(info.sections[0].title, "Other");
        assert_eq!(info.sections[0].lines, vec!["first", "second"]);
    }

    #[test]
    fn display_order_puts_headers_then_featured_then_rest() {
        let raw = "\
summary line
==> Caveats
Run it daily.
==> Analytics
install: 10
==> firefox: 128.0 (auto_updates)
https://www.mozilla.org/firefox/
==> Names
Mozilla Firefox
==> Empty

==> Description
";
        let info = parse_info(raw);
        let titles: Vec<&str> = info.display_blocks().iter().map(|b| b.title).collect();
        assert_eq!(
            titles,
            vec![
                "Summary",
                "firefox: 128.0 (auto_updates)",
                "Names",
                "Description",
                "Analytics",
                "Caveats"
            ]
        );

        let blocks = info.display_blocks();
        let description = blocks.iter().find(|b| b.title == "Description").unwrap();
        assert_eq!(description.lines, vec!["(empty)"]);
    }

    #[test]
    fn display_height_counts_title_and_spacing() {
        let info = parse_info("==> jq: stable 1.7\nline one\nline two\n");
        assert_eq!(info.display_height(), 4);
    }
}
