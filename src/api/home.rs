//! Home page route - the upload form

use actix_web::{get, web, HttpResponse, Responder};

const INDEX_HTML: &str = r##"<!doctype html>
<html lang="en">
    <head>
        <meta charset="UTF-8" />
        <meta name="viewport" content="width=device-width, initial-scale=1.0" />
        <title>Pixelsmith</title>
        <link
            rel="stylesheet"
            href="https://cdn.jsdelivr.net/npm/@picocss/pico@2/css/pico.min.css"
        />
        <style>
            .swatch-row {
                display: flex;
                flex-wrap: wrap;
                gap: 0.25rem;
                margin: 0.5rem 0;
            }
            .swatch {
                padding: 0.5rem 0.75rem;
                border-radius: 0.25rem;
                font-size: 0.8rem;
            }
            .indicator {
                display: none;
            }
        </style>
    </head>
    <body class="container">
        <header>
            <h1>Pixelate your images</h1>
        </header>
        <main>
            <article>
                <form id="form">
                    <input type="file" name="file" required />
                    <button>Upload</button>
                </form>
            </article>

            <div id="indicator" class="indicator">
                <progress id="progress" value="0" max="100"></progress>
                <span aria-busy="true">Generating your images...</span>
            </div>

            <article><div id="images">...</div></article>
        </main>
        <footer class="grid">
            <b>Pixelsmith</b>
            <p style="text-align: right">Powered by Actix / image-rs / PicoCSS</p>
        </footer>
        <script>
            const form = document.getElementById("form");
            const progress = document.getElementById("progress");
            const indicator = document.getElementById("indicator");
            const images = document.getElementById("images");

            function swatchRow(palette) {
                const row = document.createElement("div");
                row.className = "swatch-row";
                for (const swatch of palette) {
                    const el = document.createElement("span");
                    el.className = "swatch";
                    el.style.background = swatch.hex;
                    el.style.color = swatch.textColor;
                    el.textContent = swatch.hex;
                    el.title = Math.round(swatch.weight * 100) + "%";
                    row.appendChild(el);
                }
                return row;
            }

            function section(title) {
                const div = document.createElement("div");
                const heading = document.createElement("h2");
                heading.textContent = title;
                div.appendChild(heading);
                return div;
            }

            function render(payload) {
                images.replaceChildren();

                const original = section("Original palette");
                original.appendChild(swatchRow(payload.originalPalette));
                images.appendChild(original);

                for (const result of payload.results) {
                    const block = section("Pixelate Size: " + result.blockSize);
                    const img = document.createElement("img");
                    img.src = result.image;
                    img.alt = "Pixelate Size: " + result.blockSize;
                    block.appendChild(img);
                    block.appendChild(swatchRow(result.palette));
                    images.appendChild(block);
                }
            }

            form.addEventListener("submit", (event) => {
                event.preventDefault();

                const xhr = new XMLHttpRequest();
                xhr.open("POST", "/upload");
                xhr.upload.addEventListener("progress", (e) => {
                    if (e.lengthComputable) {
                        progress.value = (e.loaded / e.total) * 100;
                    }
                });
                xhr.addEventListener("load", () => {
                    indicator.style.display = "none";
                    let payload = null;
                    try {
                        payload = JSON.parse(xhr.responseText);
                    } catch {}
                    if (xhr.status === 200 && payload) {
                        render(payload);
                    } else {
                        images.textContent =
                            (payload && payload.error) || "Oops, try another file";
                    }
                });
                xhr.addEventListener("error", () => {
                    indicator.style.display = "none";
                    images.textContent = "Upload failed";
                });

                indicator.style.display = "block";
                progress.value = 0;
                images.textContent = "";
                xhr.send(new FormData(form));
            });
        </script>
    </body>
</html>
"##;

/// GET / - the upload page
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Configure home routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}
