//! HTML pages
//!
//! Plain server-rendered markup with one small script that keeps the total
//! in step with the four amount inputs. The inputs accept any whole number;
//! the arrow keys move them by the cost step.

use taller::cost::{format_amount, COST_STEP};
use taller::{EditForm, SaveReceipt};

/// Kind of message shown above a page's content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    fn class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "ok",
            NoticeLevel::Warning => "warn",
            NoticeLevel::Error => "error",
        }
    }
}

/// A message for the person at the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }

    fn html(&self) -> String {
        format!(
            "<p class=\"notice {}\">{}</p>\n",
            self.level.class(),
            escape(&self.message)
        )
    }
}

/// Escape text for element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = "body{font-family:sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem}\
label{display:block;margin-top:.8rem;font-weight:bold}\
input,select,textarea{width:100%;padding:.3rem;box-sizing:border-box}\
input[type=checkbox]{width:auto}\
table{border-collapse:collapse;width:100%}td{padding:.2rem .4rem;border-bottom:1px solid #ddd}\
.notice{padding:.6rem;border-radius:4px}.ok{background:#e3f6e3}.warn{background:#fff4d6}.error{background:#fbe0e0}\
.total{font-size:1.4rem}";

const LIVE_TOTAL_SCRIPT: &str = r#"<script>
(function () {
  const ids = ["interno_valor", "externo_valor", "mantencion", "reparacion"];
  function recompute() {
    let total = 0;
    for (const id of ids) {
      const v = parseInt(document.getElementById(id).value, 10);
      if (v > 0) total += v;
    }
    document.getElementById("total").textContent = "$" + total;
  }
  function nudge(event) {
    if (event.key !== "ArrowUp" && event.key !== "ArrowDown") return;
    event.preventDefault();
    const input = event.target;
    const step = parseInt(input.dataset.step, 10) || 1;
    const current = parseInt(input.value, 10) || 0;
    const next = current + (event.key === "ArrowUp" ? step : -step);
    input.value = Math.max(0, next);
    recompute();
  }
  ids.forEach(function (id) {
    const input = document.getElementById(id);
    input.addEventListener("input", recompute);
    input.addEventListener("keydown", nudge);
  });
})();
</script>
"#;

fn page(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n{head_extra}<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    )
}

fn search_box(value: &str) -> String {
    format!(
        "<form method=\"get\" action=\"/\">\n\
         <label for=\"caso\">Número de caso</label>\n\
         <input id=\"caso\" name=\"caso\" inputmode=\"numeric\" value=\"{}\" autofocus>\n\
         <button type=\"submit\">Buscar</button>\n</form>\n",
        escape(value)
    )
}

/// The landing page: just the search box
pub fn search_page(query: &str, notice: Option<&Notice>) -> String {
    let mut body = String::from("<h1>Gestión de casos</h1>\n");
    if let Some(notice) = notice {
        body.push_str(&notice.html());
    }
    body.push_str(&search_box(query));
    page("Gestión de casos", "", &body)
}

/// A page that only reports a problem, with the search box to start over
pub fn error_page(notice: &Notice) -> String {
    let mut body = String::from("<h1>Gestión de casos</h1>\n");
    body.push_str(&notice.html());
    body.push_str(&search_box(""));
    page("Gestión de casos", "", &body)
}

fn amount_input(id: &str, label: &str, value: u64) -> String {
    format!(
        "<label for=\"{id}\">{label}</label>\n\
         <input id=\"{id}\" name=\"{id}\" type=\"number\" min=\"0\" step=\"1\" data-step=\"{COST_STEP}\" value=\"{value}\">\n"
    )
}

fn text_input(id: &str, label: &str, value: &str) -> String {
    format!(
        "<label for=\"{id}\">{label}</label>\n<input id=\"{id}\" name=\"{id}\" value=\"{}\">\n",
        escape(value)
    )
}

/// The edit form of one ticket
pub fn form_page(form: &EditForm, notice: Option<&Notice>) -> String {
    let id = form.ticket_id.as_str();
    let case = form.ticket_id.case_number().unwrap_or_default();
    let edits = &form.edits;

    let mut body = format!("<h1>Caso {}</h1>\n", escape(id));
    if let Some(notice) = notice {
        body.push_str(&notice.html());
    }

    body.push_str("<h2>Datos de ingreso</h2>\n<table>\n");
    for (label, value) in form.intake.display_rows() {
        body.push_str(&format!(
            "<tr><td>{label}</td><td>{}</td></tr>\n",
            escape(value)
        ));
    }
    body.push_str("</table>\n");

    if let Some(stored) = &form.unrecognized_status {
        body.push_str(
            &Notice::warning(format!(
                "El estado guardado «{stored}» no es reconocido; se muestra {}.",
                edits.status
            ))
            .html(),
        );
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"/ticket/{case}\">\n\
         <input type=\"hidden\" name=\"fila\" value=\"{}\">\n\
         <label for=\"estado\">Estado</label>\n<select id=\"estado\" name=\"estado\">\n",
        form.row.get()
    ));
    for (status, selected) in form.status_options() {
        let label = status.label();
        let selected = if selected { " selected" } else { "" };
        body.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            escape(label),
            escape(label)
        ));
    }
    body.push_str("</select>\n<h2>Costos</h2>\n");

    if !form.current_parts_detail.is_empty() {
        body.push_str(&format!(
            "<p>Detalle registrado: {}</p>\n",
            escape(&form.current_parts_detail)
        ));
    }

    let costs = &edits.costs;
    body.push_str(&text_input(
        "interno_desc",
        "Repuestos internos (descripción)",
        &costs.internal.description,
    ));
    body.push_str(&amount_input("interno_valor", "Repuestos internos (valor)", costs.internal.value));
    body.push_str(&text_input(
        "externo_desc",
        "Repuestos externos (descripción)",
        &costs.external.description,
    ));
    body.push_str(&amount_input("externo_valor", "Repuestos externos (valor)", costs.external.value));
    body.push_str(&amount_input("mantencion", "Mano de obra: mantención", costs.maintenance));
    body.push_str(&amount_input("reparacion", "Mano de obra: reparación", costs.repair));
    body.push_str(&format!(
        "<p class=\"total\">Total: <strong id=\"total\">{}</strong></p>\n",
        format_amount(form.live_total())
    ));

    body.push_str(&format!(
        "<label for=\"informe\">Informe técnico</label>\n\
         <textarea id=\"informe\" name=\"informe\" rows=\"5\">{}</textarea>\n\
         <label for=\"trabajo\">Trabajo realizado (nota interna)</label>\n\
         <textarea id=\"trabajo\" name=\"trabajo\" rows=\"3\">{}</textarea>\n\
         <label><input type=\"checkbox\" name=\"notificar\" value=\"1\"{}> Notificar al cliente</label>\n\
         <button type=\"submit\">Guardar cambios</button>\n</form>\n",
        escape(&edits.diagnosis),
        escape(&edits.work_note),
        if edits.notify { " checked" } else { "" }
    ));
    body.push_str("<p><a href=\"/\">Buscar otro caso</a></p>\n");
    body.push_str(LIVE_TOTAL_SCRIPT);

    page(&format!("Caso {id}"), "", &body)
}

/// Confirmation shown after a save, reloading the ticket after a pause
pub fn saved_page(receipt: &SaveReceipt, confirm_seconds: u64) -> String {
    let case = receipt.ticket_id.case_number().unwrap_or_default();
    let refresh = format!(
        "<meta http-equiv=\"refresh\" content=\"{confirm_seconds};url=/ticket/{case}\">\n"
    );

    let mut message = format!(
        "Caso {} actualizado. Total: {}",
        receipt.ticket_id,
        format_amount(receipt.total)
    );
    if receipt.notified {
        message.push_str(". Marcado para notificar al cliente");
    }

    let body = format!(
        "<h1>Caso {}</h1>\n{}<p><a href=\"/ticket/{case}\">Volver al caso</a></p>\n",
        escape(receipt.ticket_id.as_str()),
        Notice::success(message).html()
    );
    page("Cambios guardados", &refresh, &body)
}

/// Passphrase prompt
pub fn login_page(rejected: bool) -> String {
    let mut body = String::from("<h1>Acceso</h1>\n");
    if rejected {
        body.push_str(&Notice::error("Clave incorrecta").html());
    }
    body.push_str(
        "<form method=\"post\" action=\"/acceso\">\n\
         <label for=\"clave\">Clave de acceso</label>\n\
         <input id=\"clave\" name=\"clave\" type=\"password\" autofocus>\n\
         <button type=\"submit\">Entrar</button>\n</form>\n",
    );
    page("Acceso", "", &body)
}
