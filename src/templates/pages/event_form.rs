// templates/pages/event_form.rs
use crate::admin::{AdminSession, EditorMode, EditorState, MAX_IMAGE_BYTES};
use crate::templates::desktop_layout;
use maud::{html, Markup, PreEscaped};

// Stages the picked file with a raw-body POST, then shows the server's preview.
const IMAGE_SCRIPT: &str = r#"
function stageImage(input) {
  var file = input.files[0];
  var status = document.getElementById('imageStatus');
  if (!file) return;
  fetch('/admin/image?name=' + encodeURIComponent(file.name), {
    method: 'POST',
    headers: { 'Content-Type': file.type || 'application/octet-stream' },
    body: file
  }).then(function (resp) {
    return resp.text().then(function (text) {
      status.textContent = resp.ok ? '' : text;
      if (resp.ok) {
        var img = document.getElementById('imagePreview');
        img.src = '/admin/image/preview?t=' + Date.now();
        document.getElementById('imagePreviewContainer').style.display = 'block';
      }
      input.value = '';
    });
  });
}
function removeImage() {
  fetch('/admin/image/remove', { method: 'POST' }).then(function () {
    document.getElementById('imagePreviewContainer').style.display = 'none';
    document.getElementById('imagePreview').src = '';
  });
}
"#;

pub fn event_form_page(session: &AdminSession) -> Markup {
    let form = &session.form;
    let (heading, submit_label) = match session.mode {
        EditorMode::Create => ("Create New Event", "Create Event"),
        EditorMode::Update { .. } => ("Edit Event", "Update Event"),
    };
    let submitting_label = match session.mode {
        EditorMode::Create => "Creating...",
        EditorMode::Update { .. } => "Updating...",
    };
    let error = match &session.state {
        EditorState::Failed(message) => Some(message.as_str()),
        _ => None,
    };
    let preview = if session.staged_image.is_some() {
        Some("/admin/image/preview".to_string())
    } else {
        session.existing_image_url.clone()
    };
    let period_pm = form.period != "AM";

    desktop_layout(
        heading,
        Some(&session.user.email),
        html! {
            main class="container narrow" {
                p { a href="/admin" { "← Back to events" } }
                h1 id="formTitle" { (heading) }

                form id="eventForm" method="post" action="/admin/events"
                    onsubmit=(format!("var b=document.getElementById('submitBtn');b.disabled=true;b.textContent='{submitting_label}';"))
                {
                    label for="eventTitle" { "Title *" }
                    input type="text" id="eventTitle" name="title" value=(form.title) required;

                    label for="eventDescription" { "Description *" }
                    textarea id="eventDescription" name="description" rows="4" required { (form.description) }

                    label for="eventDate" { "Date *" }
                    input type="date" id="eventDate" name="date" value=(form.date) required;

                    fieldset class="time-inputs" {
                        legend { "Time" }
                        input type="number" id="eventHour" name="hour" min="1" max="12" placeholder="hh" value=(form.hour);
                        ":"
                        input type="text" id="eventMinute" name="minute" pattern="[0-5][0-9]" placeholder="mm" value=(form.minute);
                        select id="eventPeriod" name="period" {
                            option value="AM" selected[!period_pm] { "AM" }
                            option value="PM" selected[period_pm] { "PM" }
                        }
                    }

                    label for="eventLocation" { "Location *" }
                    input type="text" id="eventLocation" name="location" value=(form.location_name) required;

                    label class="checkbox" {
                        input type="checkbox" id="eventRecurring" name="recurring" checked[form.recurring];
                        " Recurring event"
                    }

                    label for="eventLink" { "More info link" }
                    input type="url" id="eventLink" name="link" value=(form.link);

                    div class="image-upload" {
                        label for="eventImage" { "Image (max " (MAX_IMAGE_BYTES / (1024 * 1024)) "MB)" }
                        input type="file" id="eventImage" accept="image/*" onchange="stageImage(this)";
                        p id="imageStatus" class="form-error" {}
                        div id="imagePreviewContainer" style=(if preview.is_some() { "display: block" } else { "display: none" }) {
                            img id="imagePreview" src=(preview.as_deref().unwrap_or_default()) alt="Event image preview";
                            @if session.staged_image.is_some() {
                                button type="button" class="btn-link" onclick="removeImage()" { "Remove" }
                            }
                        }
                    }

                    p id="formError" class="form-error" { (error.unwrap_or_default()) }
                    button type="submit" id="submitBtn" class="btn primary" { (submit_label) }
                }
                script { (PreEscaped(IMAGE_SCRIPT)) }
            }
        },
    )
}
