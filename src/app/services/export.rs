//! Presentation export.
//!
//! Slides are rasterized by a [`SlideRenderer`] supplied by the host. HTML
//! export embeds the images in a self-contained player page; PDF export lays
//! out one page per slide and hands it to a [`PdfWriter`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::app::domain::presentation::{Presentation, Slide};
use crate::app::infrastructure::error::Result;

/// Rasterizes a slide to PNG bytes.
pub trait SlideRenderer {
    /// `Ok(None)` means the capture failed for this slide only; the slide is
    /// skipped (HTML) or left blank (PDF).
    fn render(&mut self, slide: &Slide, index: usize) -> Result<Option<Vec<u8>>>;
}

/// One landscape page of an exported PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfPage {
    /// PNG of the slide, scaled to fill the page. `None` leaves the page blank.
    pub image: Option<Vec<u8>>,
    /// Printed below a separator at the bottom of the page.
    pub notes: Option<String>,
}

/// Writes a finished document; the format backend is up to the host.
pub trait PdfWriter {
    fn write(&mut self, file_name: &str, pages: &[PdfPage]) -> Result<()>;
}

/// Finished HTML export, ready to be saved under `file_name`.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlExport {
    pub file_name: String,
    pub html: String,
}

/// `<title>.<extension>`, with path separators in the title replaced so the
/// result stays a single file name.
pub fn export_file_name(title: &str, extension: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!("{}.{}", name, extension)
}

pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

/// Capture every slide in playback order.
pub fn capture_slides(
    presentation: &Presentation,
    renderer: &mut dyn SlideRenderer,
) -> Result<Vec<Option<Vec<u8>>>> {
    presentation
        .slides
        .iter()
        .enumerate()
        .map(|(i, slide)| renderer.render(slide, i))
        .collect()
}

pub fn export_html(
    presentation: &Presentation,
    renderer: &mut dyn SlideRenderer,
) -> Result<HtmlExport> {
    let images: Vec<String> = capture_slides(presentation, renderer)?
        .into_iter()
        .flatten()
        .map(|png| png_data_uri(&png))
        .collect();
    Ok(HtmlExport {
        file_name: export_file_name(&presentation.title, "html"),
        html: render_html(&presentation.title, &images),
    })
}

/// Pair captures with slide notes. Notes are only printed on pages that
/// received an image.
pub fn pdf_pages(presentation: &Presentation, images: Vec<Option<Vec<u8>>>) -> Vec<PdfPage> {
    presentation
        .slides
        .iter()
        .zip(images)
        .map(|(slide, image)| {
            let notes = match image {
                Some(_) => slide.notes.clone().filter(|n| !n.is_empty()),
                None => None,
            };
            PdfPage { image, notes }
        })
        .collect()
}

/// Capture, lay out and write a PDF. Returns the file name used.
pub fn export_pdf(
    presentation: &Presentation,
    renderer: &mut dyn SlideRenderer,
    writer: &mut dyn PdfWriter,
) -> Result<String> {
    let images = capture_slides(presentation, renderer)?;
    let pages = pdf_pages(presentation, images);
    let file_name = export_file_name(&presentation.title, "pdf");
    writer.write(&file_name, &pages)?;
    Ok(file_name)
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const PLAYER_STYLE: &str = r#"body, html {
      margin: 0;
      padding: 0;
      height: 100%;
      font-family: 'Inter', sans-serif;
      background-color: #000;
      overflow: hidden;
    }
    .presentation-container {
      width: 100%;
      height: 100%;
      display: flex;
      align-items: center;
      justify-content: center;
      position: relative;
    }
    .slide {
      width: 100%;
      max-width: 90%;
      max-height: 90%;
      display: none;
      object-fit: contain;
    }
    .slide.active {
      display: block;
    }
    .controls {
      position: absolute;
      bottom: 20px;
      left: 50%;
      transform: translateX(-50%);
      display: flex;
      gap: 10px;
    }
    .control-btn {
      background: rgba(255,255,255,0.2);
      border: none;
      color: white;
      width: 40px;
      height: 40px;
      border-radius: 50%;
      cursor: pointer;
      font-size: 20px;
    }
    .slide-counter {
      position: absolute;
      bottom: 20px;
      right: 20px;
      color: white;
      background: rgba(0,0,0,0.5);
      padding: 5px 10px;
      border-radius: 15px;
      font-size: 14px;
    }"#;

const PLAYER_SCRIPT: &str = r#"const slides = document.querySelectorAll('.slide');
    const counter = document.getElementById('current-slide');
    let current = 0;

    function showSlide(index) {
      if (slides.length === 0) return;
      slides.forEach(slide => slide.classList.remove('active'));
      slides[index].classList.add('active');
      counter.textContent = index + 1;
    }

    function nextSlide() {
      if (slides.length === 0) return;
      current = (current + 1) % slides.length;
      showSlide(current);
    }

    function prevSlide() {
      if (slides.length === 0) return;
      current = (current - 1 + slides.length) % slides.length;
      showSlide(current);
    }

    document.addEventListener('keydown', (e) => {
      if (e.key === 'ArrowRight' || e.key === ' ') {
        nextSlide();
      } else if (e.key === 'ArrowLeft') {
        prevSlide();
      }
    });"#;

/// Self-contained player page showing `images` (data URIs) one at a time.
pub fn render_html(title: &str, images: &[String]) -> String {
    let slides: String = images
        .iter()
        .enumerate()
        .map(|(i, src)| {
            let active = if i == 0 { " active" } else { "" };
            format!(
                "\n    <img src=\"{}\" alt=\"Slide {}\" class=\"slide{}\" data-slide=\"{}\">",
                escape_html(src),
                i + 1,
                active,
                i
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{title}</title>
  <style>
    {style}
  </style>
</head>
<body>
  <div class="presentation-container">{slides}
    <div class="controls">
      <button class="control-btn prev-btn" onclick="prevSlide()">&larr;</button>
      <button class="control-btn next-btn" onclick="nextSlide()">&rarr;</button>
    </div>
    <div class="slide-counter">
      <span id="current-slide">1</span> / <span id="total-slides">{total}</span>
    </div>
  </div>
  <script>
    {script}
  </script>
</body>
</html>
"#,
        title = escape_html(title),
        style = PLAYER_STYLE,
        slides = slides,
        total = images.len(),
        script = PLAYER_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::infrastructure::error::AppError;

    /// Renders every slide as its index byte, failing on the listed indices.
    struct FakeRenderer {
        skip: Vec<usize>,
    }

    impl SlideRenderer for FakeRenderer {
        fn render(&mut self, _slide: &Slide, index: usize) -> Result<Option<Vec<u8>>> {
            if self.skip.contains(&index) {
                Ok(None)
            } else {
                Ok(Some(vec![index as u8]))
            }
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        written: Vec<(String, Vec<PdfPage>)>,
    }

    impl PdfWriter for RecordingWriter {
        fn write(&mut self, file_name: &str, pages: &[PdfPage]) -> Result<()> {
            self.written.push((file_name.to_string(), pages.to_vec()));
            Ok(())
        }
    }

    fn three_slides() -> Presentation {
        let mut deck = Presentation::new("Quarterly <Review>");
        deck.slides.push(Slide::blank());
        deck.slides.push(Slide::blank());
        deck.slides[1].notes = Some("Talk about revenue".to_string());
        deck.slides[2].notes = Some("Never printed".to_string());
        deck
    }

    #[test]
    fn test_file_name_has_no_separators() {
        assert_eq!(export_file_name("Q3 Review", "pdf"), "Q3 Review.pdf");
        assert_eq!(export_file_name("2024/25 plan", "html"), "2024-25 plan.html");
        assert_eq!(export_file_name("..\\..\\secrets", "pdf"), "..-..-secrets.pdf");
    }

    #[test]
    fn test_png_data_uri() {
        assert_eq!(png_data_uri(b"png"), "data:image/png;base64,cG5n");
    }

    #[test]
    fn test_render_html_contents() {
        let images = vec!["data:a".to_string(), "data:b".to_string()];
        let html = render_html("Tom & Jerry", &images);
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains(r#"class="slide active" data-slide="0""#));
        assert!(html.contains(r#"class="slide" data-slide="1""#));
        assert!(html.contains(r#"<span id="total-slides">2</span>"#));
        assert!(html.contains("ArrowRight"));
        assert!(html.contains("ArrowLeft"));
    }

    #[test]
    fn test_export_html_skips_failed_captures() {
        let deck = three_slides();
        let mut renderer = FakeRenderer { skip: vec![1] };
        let export = export_html(&deck, &mut renderer).unwrap();
        assert_eq!(export.file_name, "Quarterly <Review>.html");
        assert!(export.html.contains("Quarterly &lt;Review&gt;"));
        assert_eq!(export.html.matches("<img ").count(), 2);
        assert!(export.html.contains(&png_data_uri(&[2])));
    }

    #[test]
    fn test_export_pdf_pages() {
        let deck = three_slides();
        let mut renderer = FakeRenderer { skip: vec![2] };
        let mut writer = RecordingWriter::default();
        let file_name = export_pdf(&deck, &mut renderer, &mut writer).unwrap();
        assert_eq!(file_name, "Quarterly <Review>.pdf");

        let (written_name, pages) = &writer.written[0];
        assert_eq!(written_name, &file_name);
        assert_eq!(pages.len(), 3);
        assert_eq!(pages[1].notes.as_deref(), Some("Talk about revenue"));
        assert_eq!(pages[2].image, None);
        assert_eq!(pages[2].notes, None);
    }

    #[test]
    fn test_renderer_error_propagates() {
        struct Broken;
        impl SlideRenderer for Broken {
            fn render(&mut self, _slide: &Slide, _index: usize) -> Result<Option<Vec<u8>>> {
                Err(AppError::Export("capture failed".to_string()))
            }
        }
        let err = export_html(&Presentation::new("Deck"), &mut Broken).unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
    }
}
