//! Shared fixtures for integration tests

#![allow(dead_code)]

pub const HEADER: &str = "CONFIDENTIAL DRAFT";
pub const BODY: &str = "Quarterly results are attached";
/// Header text repeated far below the band
pub const BODY_MENTION: &str = "This page is a CONFIDENTIAL DRAFT copy";

/// A text run in PDF user space (origin bottom-left)
pub struct TextRun<'a> {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub text: &'a str,
}

impl<'a> TextRun<'a> {
    pub fn new(x: f32, y: f32, text: &'a str) -> Self {
        Self {
            x,
            y,
            size: 12.0,
            text,
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)")
}

/// Build a US Letter PDF with one Helvetica content stream per page
///
/// Offsets in the xref table are exact, so MuPDF opens the file without
/// a repair pass.
pub fn build_pdf(pages: &[Vec<TextRun>]) -> Vec<u8> {
    let page_count = pages.len();
    let mut objects: Vec<String> = Vec::new();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());

    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 4 + i * 2))
        .collect();
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        page_count
    ));

    objects.push("<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string());

    for (i, runs) in pages.iter().enumerate() {
        let page_obj = 4 + i * 2;
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents {} 0 R /Resources << /Font << /F1 3 0 R >> >> >>",
            page_obj + 1
        ));

        let content: String = runs
            .iter()
            .map(|run| {
                format!(
                    "BT /F1 {} Tf {} {} Td ({}) Tj ET\n",
                    run.size,
                    run.x,
                    run.y,
                    escape(run.text)
                )
            })
            .collect();
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", i + 1, body));
    }

    let xref_offset = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n", objects.len() + 1));
    pdf.push_str("0000000000 65535 f \n");
    for offset in &offsets {
        pdf.push_str(&format!("{:010} 00000 n \n", offset));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));

    pdf.into_bytes()
}

/// Pages with the header near the top, body text and a second mention of
/// the header well below the band
pub fn headed_pdf(page_count: usize) -> Vec<u8> {
    let pages: Vec<Vec<TextRun>> = (0..page_count)
        .map(|_| {
            vec![
                TextRun::new(72.0, 760.0, HEADER),
                TextRun::new(72.0, 400.0, BODY),
                TextRun::new(72.0, 300.0, BODY_MENTION),
            ]
        })
        .collect();
    build_pdf(&pages)
}

/// Single page with `header` at the top and the body text below
pub fn single_header_pdf(header: &str) -> Vec<u8> {
    build_pdf(&[vec![
        TextRun::new(72.0, 760.0, header),
        TextRun::new(72.0, 400.0, BODY),
    ]])
}

/// Single page whose header is written in lower case
pub fn lowercase_header_pdf() -> Vec<u8> {
    single_header_pdf("confidential draft")
}

/// Text of every page, in order
pub fn page_texts(pdf: &[u8]) -> Vec<String> {
    let doc = mupdf::Document::from_bytes(pdf, "application/pdf").expect("open output");
    let count = doc.page_count().expect("page count");
    (0..count)
        .map(|i| {
            let page = doc.load_page(i).expect("load page");
            let text_page = page
                .to_text_page(mupdf::TextPageFlags::empty())
                .expect("text page");
            text_page.to_text().expect("page text")
        })
        .collect()
}
