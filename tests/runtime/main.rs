//! Integration tests for Layer 5: Runtime
//!
//! Tests for sessions, compiled artifact persistence, and the REPL.

mod repl;
mod session;

pub const STATEMENTS: &str = r#"
<g unclassified-token-class-name="keyword" unsupported-token-class-name="undefined">
  <d name="program">
    <c>
      <d name="statement">
        <c>
          <d name="id" token-class="identifier">
            <c><d name="letter" symbol-class="letter"><cta>abcdefghijklmnopqrstuvwxyz</cta></d></c>
            <c><n>id</n><n>letter</n></c>
          </d>
          <t>:=</t>
          <n>id</n>
        </c>
        <c><t>skip</t></c>
      </d>
    </c>
    <c><n>statement</n><t>;</t><n>program</n></c>
  </d>
</g>"#;
