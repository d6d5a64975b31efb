//! Request envelopes, one builder per userdata operation
//!
//! Every element lives in the `niffler-userdata` namespace under the `nif`
//! prefix. Optional elements are emitted only when set and all text is escaped.

use super::{SOAP_ENV_NS, USERDATA_NS};
use crate::models::{PageInfo, SoapUser};
use quick_xml::escape::escape;

/// Property the paged requests sort on
const SORT_PROPERTY: &str = "username";

struct Body {
    xml: String,
}

impl Body {
    fn new() -> Self {
        Self { xml: String::new() }
    }

    fn open(&mut self, name: &str) -> &mut Self {
        self.xml.push_str("<nif:");
        self.xml.push_str(name);
        self.xml.push('>');
        self
    }

    fn close(&mut self, name: &str) -> &mut Self {
        self.xml.push_str("</nif:");
        self.xml.push_str(name);
        self.xml.push('>');
        self
    }

    fn text(&mut self, name: &str, value: &str) -> &mut Self {
        self.open(name);
        self.xml.push_str(&escape(value));
        self.close(name)
    }

    fn optional(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        match value {
            Some(value) if !value.is_empty() => self.text(name, value),
            _ => self,
        }
    }

    fn page_info(&mut self, page_info: &PageInfo) -> &mut Self {
        self.open("pageInfo")
            .text("page", &page_info.page.to_string())
            .text("size", &page_info.size.to_string());
        if let Some(direction) = page_info.sort {
            self.open("sort")
                .text("property", SORT_PROPERTY)
                .text("direction", direction.as_str())
                .close("sort");
        }
        self.close("pageInfo")
    }

    fn into_envelope(self) -> String {
        format!(
            concat!(
                r#"<soapenv:Envelope xmlns:soapenv="{}" xmlns:nif="{}">"#,
                "<soapenv:Header/>",
                "<soapenv:Body>{}</soapenv:Body>",
                "</soapenv:Envelope>"
            ),
            SOAP_ENV_NS, USERDATA_NS, self.xml
        )
    }
}

fn username_request(operation: &str, username: &str) -> String {
    let mut body = Body::new();
    body.open(operation).text("username", username).close(operation);
    body.into_envelope()
}

fn pair_request(operation: &str, username: &str, other_name: &str, other: &str) -> String {
    let mut body = Body::new();
    body.open(operation)
        .text("username", username)
        .text(other_name, other)
        .close(operation);
    body.into_envelope()
}

fn search_request(operation: &str, username: &str, search_query: Option<&str>) -> String {
    let mut body = Body::new();
    body.open(operation)
        .text("username", username)
        .optional("searchQuery", search_query)
        .close(operation);
    body.into_envelope()
}

fn page_request(
    operation: &str,
    username: &str,
    page_info: &PageInfo,
    search_query: Option<&str>,
) -> String {
    let mut body = Body::new();
    body.open(operation)
        .text("username", username)
        .page_info(page_info)
        .optional("searchQuery", search_query)
        .close(operation);
    body.into_envelope()
}

pub fn current_user(username: &str) -> String {
    username_request("currentUserRequest", username)
}

pub fn update_user(user: &SoapUser) -> String {
    let mut body = Body::new();
    body.open("updateUserRequest")
        .open("user")
        .optional("id", user.id.as_deref())
        .optional("username", user.username.as_deref())
        .optional("firstname", user.firstname.as_deref())
        .optional("surname", user.surname.as_deref())
        .optional("currency", user.currency.as_deref())
        .optional("photo", user.photo.as_deref())
        .optional("photoSmall", user.photo_small.as_deref())
        .optional("fullName", user.full_name.as_deref())
        .optional("friendshipStatus", user.friendship_status.as_deref())
        .close("user")
        .close("updateUserRequest");
    body.into_envelope()
}

pub fn all_users(username: &str, search_query: Option<&str>) -> String {
    search_request("allUsersRequest", username, search_query)
}

pub fn all_users_page(username: &str, page_info: &PageInfo, search_query: Option<&str>) -> String {
    page_request("allUsersPageRequest", username, page_info, search_query)
}

pub fn friends(username: &str, search_query: Option<&str>) -> String {
    search_request("friendsRequest", username, search_query)
}

pub fn friends_page(username: &str, page_info: &PageInfo, search_query: Option<&str>) -> String {
    page_request("friendsPageRequest", username, page_info, search_query)
}

pub fn send_invitation(username: &str, friend_to_be_requested: &str) -> String {
    pair_request(
        "sendInvitationRequest",
        username,
        "friendToBeRequested",
        friend_to_be_requested,
    )
}

pub fn accept_invitation(username: &str, friend_to_be_added: &str) -> String {
    pair_request(
        "acceptInvitationRequest",
        username,
        "friendToBeAdded",
        friend_to_be_added,
    )
}

pub fn decline_invitation(username: &str, invitation_to_be_declined: &str) -> String {
    pair_request(
        "declineInvitationRequest",
        username,
        "invitationToBeDeclined",
        invitation_to_be_declined,
    )
}

pub fn remove_friend(username: &str, friend_to_be_removed: &str) -> String {
    pair_request(
        "removeFriendRequest",
        username,
        "friendToBeRemoved",
        friend_to_be_removed,
    )
}
