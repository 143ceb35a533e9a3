/// Parse a page selection like "1,3-5" into sorted, de-duplicated 0-based indices.
///
/// Page numbers in the selection are 1-based regardless of `--index-base`,
/// which only affects output naming.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();

    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (first, last) = match part.split_once('-') {
            Some((a, b)) => (page_number(a, page_count)?, page_number(b, page_count)?),
            None => {
                let p = page_number(part, page_count)?;
                (p, p)
            }
        };
        if first > last {
            return Err(format!("range '{part}' is reversed"));
        }
        pages.extend((first..=last).map(|p| p - 1));
    }

    if pages.is_empty() {
        return Err(format!("no pages selected by '{input}'"));
    }
    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn page_number(s: &str, page_count: usize) -> Result<usize, String> {
    let s = s.trim();
    let page: usize = s
        .parse()
        .map_err(|_| format!("invalid page number: '{s}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    if page > page_count {
        return Err(format!(
            "page {page} exceeds document page count ({page_count})"
        ));
    }
    Ok(page)
}
