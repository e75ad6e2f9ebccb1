//! Codepages command handler

use anyhow::Result;

use retroscope::CodePage;

/// List every supported code page with the labels it answers to.
#[cfg(not(tarpaulin_include))]
pub fn handle() -> Result<()> {
    print!("{}", listing());
    Ok(())
}

pub(crate) fn listing() -> String {
    let mut out = String::new();
    for page in CodePage::ALL {
        out.push_str(&format!(
            "{:<14} {:<28} {}\n",
            page.name(),
            page.description(),
            page.labels().join(", ")
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_has_one_line_per_page() {
        let listing = listing();
        assert_eq!(listing.lines().count(), CodePage::ALL.len());
        assert!(listing.starts_with("CP437"));
        assert!(listing.contains("latin1"));
    }
}
