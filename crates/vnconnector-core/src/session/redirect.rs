/// Render the page that sends the browser to the SSO login form.
///
/// The page is a hidden form posting `callback` and `role` to `endpoint`, submitted on load. The
/// values are inserted verbatim, the SSO service expects them unescaped.
pub(super) fn render_redirect_page(endpoint: &str, callback: &str, role: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, user-scalable=no, initial-scale=1.0, maximum-scale=1.0, minimum-scale=1.0">
<meta http-equiv="X-UA-Compatible" content="ie=edge">
<title>SSO Login Redirecting...</title>
</head>
<body>
<form id="frm" method="post" action="{endpoint}" enctype="application/x-www-form-urlencoded">
    <input type="hidden" name="callback" value="{callback}/session/login"/>
    <input type="hidden" name="role" value="{role}"/>
</form>
<script type="text/javascript">
    document.querySelector('#frm').submit()
</script>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_redirect_page() {
        let page = render_redirect_page(
            "https://sso.vnlin.com",
            "https://app.vnlin.com/admin",
            "operator",
        );

        assert!(page.starts_with("<!doctype html>\n<html lang=\"en\">"));
        assert!(page.contains(
            r#"<form id="frm" method="post" action="https://sso.vnlin.com" enctype="application/x-www-form-urlencoded">"#
        ));
        assert!(page.contains(
            r#"<input type="hidden" name="callback" value="https://app.vnlin.com/admin/session/login"/>"#
        ));
        assert!(page.contains(r#"<input type="hidden" name="role" value="operator"/>"#));
        assert!(page.ends_with("</body>\n</html>"));
    }
}
