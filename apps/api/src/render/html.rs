use tera::{Context, Tera};

use crate::render::tree::RenderedCv;

const PREVIEW_TEMPLATE: &str = r#"<div class="cv-preview cv-{{ layout }}" style="color: {{ style.textColor }}; font-family: {{ style.bodyFont }}, sans-serif;">
{%- for column in columns %}
  <div class="cv-column cv-{{ column.role }}">
  {%- for block in column.blocks %}
    {%- if block.kind == "title" %}
    <h1 style="font-family: {{ style.headingFont }}, sans-serif; color: {{ style.accentColor }};">{{ block.text }}</h1>
    {%- elif block.kind == "contact" %}
    <div class="contact-info">
      {%- if block.heading %}<h3 style="font-family: {{ style.headingFont }}, sans-serif; color: {{ style.accentColor }};">{{ block.heading }}</h3>{% endif %}
      {%- for item in block.items %}{% if not loop.first and block.separator %}<span class="separator">{{ block.separator }}</span>{% endif %}<span>{{ item }}</span>{% endfor %}
    </div>
    {%- elif block.kind == "section" %}
    <section class="cv-section cv-section-{{ block.key }}">
      {%- if block.heading %}
      <h3 style="font-family: {{ style.headingFont }}, sans-serif; color: {{ style.accentColor }}; border-color: {{ style.accentColor }};">{{ block.heading }}</h3>
      {%- endif %}
      {%- for item in block.items %}
        {%- if item.kind == "paragraph" %}
      <p>{{ item.text }}</p>
        {%- elif item.kind == "entry" %}
      <div class="cv-entry">
        <div class="cv-entry-header">
          <h4>{{ item.title }}</h4>
          {%- if item.dates %}
          <span class="dates">{% if item.dates.start %}{{ item.dates.start }}{% endif %}{% if item.dates.start and item.dates.end %} – {% endif %}{% if item.dates.end %}{{ item.dates.end }}{% endif %}</span>
          {%- endif %}
        </div>
        {%- if item.subtitle %}
        <p class="subtitle">{{ item.subtitle }}</p>
        {%- endif %}
        {%- for detail in item.details %}
        <p class="detail">{{ detail }}</p>
        {%- endfor %}
        {%- if item.body %}
        <p class="description">{{ item.body }}</p>
        {%- endif %}
      </div>
        {%- elif item.kind == "tags" %}
      <div class="skills-list">{% for tag in item.tags %}<span class="skill-badge{% if tag.level %} level-{{ tag.level }}{% endif %}">{{ tag.label }}</span>{% endfor %}</div>
        {%- endif %}
      {%- endfor %}
    </section>
    {%- endif %}
  {%- endfor %}
  </div>
{%- endfor %}
</div>
"#;

/// HTML fragment of the preview. All document text is escaped.
pub fn render_html(cv: &RenderedCv) -> Result<String, tera::Error> {
    let context = Context::from_serialize(cv)?;
    Tera::one_off(PREVIEW_TEMPLATE, &context, true)
}
